//! Run the map's selection handler against a plain-text surface.

use estuary_core::config::MapConfig;
use estuary_core::handler::{SelectionHandler, SelectionOutcome};
use estuary_core::source::HttpPointSource;
use estuary_core::surface::{MapContext, MapSurface, MarkerSpec};
use log::info;
use std::cell::RefCell;
use std::rc::Rc;

/// Build the HTTP source. The CLI has no page origin, so it needs an
/// absolute base URL.
pub(crate) fn http_source(config: &MapConfig) -> anyhow::Result<HttpPointSource> {
    if config.api_base.is_empty() {
        anyhow::bail!("No endpoint base URL; pass --base-url or set api_base in the config");
    }
    Ok(HttpPointSource::new(reqwest::Client::new(), &config.api_base))
}

/// One line per marker: position followed by the popup fields.
pub fn marker_line(spec: &MarkerSpec) -> String {
    let fields = spec
        .popup
        .fields()
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("({}, {})  {}", spec.latitude, spec.longitude, fields)
}

/// A surface that keeps a text line per live marker.
#[derive(Debug, Default)]
pub struct TextSurface {
    next_id: u32,
    entries: Vec<(u32, String)>,
}

impl TextSurface {
    pub fn lines(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, line)| line.as_str()).collect()
    }
}

impl MapSurface for TextSurface {
    type Marker = u32;

    fn add_marker(&mut self, spec: &MarkerSpec) -> u32 {
        self.next_id += 1;
        self.entries.push((self.next_id, marker_line(spec)));
        self.next_id
    }

    fn remove_marker(&mut self, marker: u32) {
        self.entries.retain(|(id, _)| *id != marker);
    }
}

pub async fn run_show(region: &str, config: &MapConfig) -> anyhow::Result<()> {
    let source = http_source(config)?;
    let context = Rc::new(RefCell::new(MapContext::new(TextSurface::default())));
    let handler = SelectionHandler::new(source, context.clone(), config.race_policy);

    match handler.on_select(region).await {
        SelectionOutcome::Rendered { markers, summary } => {
            info!("{} markers for '{}'", markers, region);
            for line in context.borrow().surface().lines() {
                println!("{}", line);
            }
            println!("{}", summary);
            Ok(())
        }
        SelectionOutcome::Skipped => anyhow::bail!("Region must not be empty"),
        SelectionOutcome::Superseded => Ok(()),
        SelectionOutcome::Failed(e) => Err(anyhow::anyhow!("Failed to load '{}': {}", region, e)),
    }
}
