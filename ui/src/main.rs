#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use structopt::StructOpt;

use feed::{DirectionID, RouteID};
use ui::{ConsoleMap, ConsoleSelection, Controller, DataLocation, Settings, UiEvent};

#[derive(StructOpt)]
struct Args {
    /// Base URL serving the data/ directory. Defaults to http://localhost:8000/
    #[structopt(long)]
    data_url: Option<String>,
    /// A local directory containing data/, instead of a server
    #[structopt(long)]
    data_dir: Option<PathBuf>,
    /// Route to show right away
    #[structopt(long)]
    route: Option<String>,
    /// Direction to switch to after the route's first direction loads
    #[structopt(long)]
    direction: Option<String>,
    /// Milliseconds between vehicle refreshes
    #[structopt(long)]
    poll_ms: Option<u64>,
    /// Quit after this many refresh periods, instead of waiting for Ctrl-C
    #[structopt(long)]
    ticks: Option<u32>,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        match (&self.data_url, &self.data_dir) {
            (Some(_), Some(_)) => bail!("You can't specify both --data-url and --data-dir"),
            (Some(url), None) => settings.data = DataLocation::Url(url.clone()),
            (None, Some(dir)) => settings.data = DataLocation::Dir(dir.clone()),
            (None, None) => {}
        }
        if let Some(ms) = self.poll_ms {
            if ms == 0 {
                bail!("--poll-ms must be positive");
            }
            settings.poll_interval = Duration::from_millis(ms);
        }
        if self.direction.is_some() && self.route.is_none() {
            bail!("--direction needs --route");
        }
        Ok(settings)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());
    let settings = args.settings()?;

    let source = settings.data.open()?;
    let map = Arc::new(ConsoleMap::new(&settings.initial_view));
    let mut controller = Controller::new(
        source,
        map,
        Box::new(ConsoleSelection::default()),
        settings.clone(),
    );
    controller.initialize().await?;

    let (tx, rx) = futures_channel::mpsc::unbounded();
    if let Some(route) = args.route {
        tx.unbounded_send(UiEvent::RouteChanged(Some(RouteID::new(route))))
            .map_err(|_| anyhow!("event channel closed"))?;
        if let Some(direction) = args.direction {
            tx.unbounded_send(UiEvent::DirectionChanged(Some(DirectionID::new(direction))))
                .map_err(|_| anyhow!("event channel closed"))?;
        }
    }

    let ticks = args.ticks;
    let period = settings.poll_interval;
    tokio::spawn(async move {
        match ticks {
            Some(n) => tokio::time::sleep(period * n).await,
            None => {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    error!("Can't listen for Ctrl-C: {err}");
                }
            }
        }
        info!("Shutting down");
        // Clearing the route stops polling; dropping the sender ends the event loop
        let _ = tx.unbounded_send(UiEvent::RouteChanged(None));
    });

    controller.run(rx).await;
    Ok(())
}
