//! Tile Runner headless driver
//!
//! Usage: `tile-runner [levels.json] [settings.json]`
//!
//! Runs the campaign at a fixed timestep with no player input, logging
//! events and printing the final frame. Useful for checking level plans.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tile_runner::consts::SIM_DT;
    use tile_runner::sim::{ActorRegistry, Campaign, CampaignProgress, GameEvent};
    use tile_runner::{Display, LevelPlans, Settings, TextDisplay};

    env_logger::init();
    log::info!("Tile Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let plans = match args.next() {
        Some(path) => match LevelPlans::load(&path) {
            Ok(plans) => plans,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => LevelPlans::builtin(),
    };
    let settings = args.next().map(Settings::load).unwrap_or_default();

    let parser = settings.parser(ActorRegistry::default_bindings());
    let Some(campaign) = Campaign::new(plans, parser) else {
        log::error!("No level plans to run");
        std::process::exit(1);
    };
    let mut campaign = campaign.with_max_step(settings.max_step);

    let mut display = TextDisplay::new();
    let ticks = (settings.demo_seconds / SIM_DT).ceil() as u64;
    for _ in 0..ticks {
        let (progress, events) = campaign.update(SIM_DT);
        for event in events {
            match event {
                GameEvent::CoinCollected { id } => log::info!("Coin #{} collected", id),
                GameEvent::PlayerBurned => log::info!("Player burned"),
                GameEvent::PlayerHit { id } => log::info!("Player hit by fireball #{}", id),
                GameEvent::LevelWon | GameEvent::LevelLost => {}
            }
        }
        match progress {
            CampaignProgress::Playing => {}
            CampaignProgress::Restarted { index } => log::info!("Restarted level {}", index + 1),
            CampaignProgress::Advanced { index } => log::info!("Now on level {}", index + 1),
            CampaignProgress::Completed => break,
        }
    }

    display.draw(campaign.level());
    println!("{}", display.frame());
    println!(
        "level {} | status {:?} | attempts {}",
        campaign.index() + 1,
        campaign.level().status,
        campaign.attempts()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web
}
