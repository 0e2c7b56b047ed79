use chrono::Utc;
use clap::Subcommand;
use tasktrail_core::TimelineCache;

#[derive(Subcommand)]
pub enum CacheAction {
    /// Show cached provider events that have not ended yet
    Show,
    /// Delete the cache file
    Clear,
}

pub fn run(action: CacheAction) -> Result<(), Box<dyn std::error::Error>> {
    let cache = TimelineCache::in_data_dir()?;
    match action {
        CacheAction::Show => {
            let providers = cache.load(Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&providers)?);
        }
        CacheAction::Clear => {
            cache.clear()?;
            println!("cache cleared");
        }
    }
    Ok(())
}
