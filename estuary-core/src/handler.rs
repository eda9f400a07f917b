//! Selection-to-render handler.
//!
//! Reacts to a region being chosen: fetches that region's points, clears the
//! markers of the previous selection and draws one marker per point. Every
//! failure is logged and ends the cycle; the handler stays ready for the
//! next selection.
//!
//! Selections may overlap. Each call to [`SelectionHandler::on_select`] runs
//! independently and the shared [`MapContext`] is only touched after the
//! fetch resolves, never across an await. Under [`RacePolicy::LastResolved`]
//! whichever response lands last decides the visible markers.

use crate::config::RacePolicy;
use crate::error::FetchError;
use crate::point::{parse_points, PointRecord};
use crate::popup::Popup;
use crate::region::RegionId;
use crate::source::PointSource;
use crate::summary::RegionSummary;
use crate::surface::{MapContext, MapSurface, MarkerSpec};
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// How one selection cycle ended.
#[derive(Debug, PartialEq, Clone)]
pub enum SelectionOutcome {
    /// Empty selection; nothing was requested or changed
    Skipped,
    /// Markers were replaced
    Rendered {
        markers: usize,
        summary: RegionSummary,
    },
    /// A newer request was issued before this one resolved
    Superseded,
    /// The fetch failed; markers were left as they were
    Failed(FetchError),
}

/// Build marker specs in response order, skipping records without a usable
/// position.
pub fn marker_specs(points: &[PointRecord]) -> Vec<MarkerSpec> {
    points
        .iter()
        .filter_map(|point| match point.position() {
            Some((latitude, longitude)) => Some(MarkerSpec {
                latitude,
                longitude,
                popup: Popup::from_record(point),
            }),
            None => {
                warn!(
                    "Skipping station {:?}: invalid coordinates ({:?}, {:?})",
                    point.station_code, point.latitude, point.longitude
                );
                None
            }
        })
        .collect()
}

pub struct SelectionHandler<S, M: MapSurface> {
    source: S,
    context: Rc<RefCell<MapContext<M>>>,
    policy: RacePolicy,
    /// Sequence number of the most recently issued request
    issued: Cell<u64>,
}

impl<S: PointSource, M: MapSurface> SelectionHandler<S, M> {
    pub fn new(source: S, context: Rc<RefCell<MapContext<M>>>, policy: RacePolicy) -> Self {
        Self {
            source,
            context,
            policy,
            issued: Cell::new(0),
        }
    }

    pub fn context(&self) -> &Rc<RefCell<MapContext<M>>> {
        &self.context
    }

    pub fn policy(&self) -> RacePolicy {
        self.policy
    }

    /// Handle one dropdown selection.
    pub async fn on_select(&self, raw: &str) -> SelectionOutcome {
        let region = match RegionId::parse(raw) {
            Some(region) => region,
            None => {
                debug!("Empty selection, nothing to do");
                return SelectionOutcome::Skipped;
            }
        };

        let ticket = self.issued.get() + 1;
        self.issued.set(ticket);
        info!("Fetching points for '{}' (request #{})", region, ticket);

        let points = match self.fetch_points(&region).await {
            Ok(points) => points,
            Err(e) => {
                error!("Failed to load points for '{}': {}", region, e);
                return SelectionOutcome::Failed(e);
            }
        };

        if self.policy == RacePolicy::LatestIssued && ticket != self.issued.get() {
            debug!(
                "Dropping response #{} for '{}', request #{} is newer",
                ticket,
                region,
                self.issued.get()
            );
            return SelectionOutcome::Superseded;
        }

        let specs = marker_specs(&points);
        self.context.borrow_mut().replace(&specs);
        info!("Rendered {} markers for '{}'", specs.len(), region);

        SelectionOutcome::Rendered {
            markers: specs.len(),
            summary: RegionSummary::from_points(&points),
        }
    }

    async fn fetch_points(&self, region: &RegionId) -> Result<Vec<PointRecord>, FetchError> {
        let body = self.source.fetch_body(region).await?;
        parse_points(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use log::{Level, LevelFilter, Metadata, Record};
    use std::collections::HashMap;

    const GANGA: &str = r#"[{"station_code":"G1","water_abundance":5,"sediment_abundance":2,"sample_date":"2023-01-01","latitude":23.5,"longitude":88.3}]"#;
    const MAHANADI: &str = r#"[
        {"station_code":"M1","water_abundance":1.5,"sediment_abundance":7,"sample_date":"2023-02-01","latitude":20.3,"longitude":86.6},
        {"station_code":"M2","water_abundance":3,"sediment_abundance":8,"sample_date":"2023-02-02","latitude":20.4,"longitude":86.7}
    ]"#;

    /// Keeps log records per thread so parallel tests don't see each other's.
    struct CaptureLogger;
    static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;

    thread_local! {
        static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            CAPTURED.with(|c| {
                c.borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    fn capture_logs() {
        let _ = log::set_logger(&CAPTURE_LOGGER);
        log::set_max_level(LevelFilter::Trace);
        CAPTURED.with(|c| c.borrow_mut().clear());
    }

    fn logged_errors() -> Vec<String> {
        CAPTURED.with(|c| {
            c.borrow()
                .iter()
                .filter(|(level, _)| *level == Level::Error)
                .map(|(_, message)| message.clone())
                .collect()
        })
    }

    #[derive(Debug, PartialEq, Clone)]
    enum SurfaceEvent {
        Add(u32),
        Remove(u32),
    }

    #[derive(Default)]
    struct RecordingSurface {
        next_id: u32,
        live: Vec<(u32, MarkerSpec)>,
        events: Vec<SurfaceEvent>,
    }

    impl MapSurface for RecordingSurface {
        type Marker = u32;

        fn add_marker(&mut self, spec: &MarkerSpec) -> u32 {
            self.next_id += 1;
            self.live.push((self.next_id, spec.clone()));
            self.events.push(SurfaceEvent::Add(self.next_id));
            self.next_id
        }

        fn remove_marker(&mut self, marker: u32) {
            self.live.retain(|(id, _)| *id != marker);
            self.events.push(SurfaceEvent::Remove(marker));
        }
    }

    /// Answers from a fixed table and records which regions were requested.
    #[derive(Default)]
    struct TableSource {
        responses: HashMap<String, Result<String, FetchError>>,
        calls: RefCell<Vec<String>>,
    }

    impl TableSource {
        fn with(mut self, region: &str, response: Result<&str, FetchError>) -> Self {
            self.responses
                .insert(region.to_string(), response.map(str::to_string));
            self
        }
    }

    impl PointSource for TableSource {
        async fn fetch_body(&self, region: &RegionId) -> Result<String, FetchError> {
            self.calls.borrow_mut().push(region.to_string());
            self.responses
                .get(region.as_str())
                .cloned()
                .unwrap_or_else(|| {
                    Err(FetchError::Http {
                        status: 404,
                        region: region.to_string(),
                    })
                })
        }
    }

    /// Each region's response is held until the test releases it.
    #[derive(Default)]
    struct GatedSource {
        gates: RefCell<HashMap<String, oneshot::Receiver<Result<String, FetchError>>>>,
    }

    impl GatedSource {
        fn gate(&self, region: &str) -> oneshot::Sender<Result<String, FetchError>> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().insert(region.to_string(), rx);
            tx
        }
    }

    impl PointSource for GatedSource {
        async fn fetch_body(&self, region: &RegionId) -> Result<String, FetchError> {
            let gate = self.gates.borrow_mut().remove(region.as_str());
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string()))),
                None => Err(FetchError::Network("no gate".to_string())),
            }
        }
    }

    fn handler<S: PointSource>(
        source: S,
        policy: RacePolicy,
    ) -> SelectionHandler<S, RecordingSurface> {
        let context = Rc::new(RefCell::new(MapContext::new(RecordingSurface::default())));
        SelectionHandler::new(source, context, policy)
    }

    fn live_stations(h: &SelectionHandler<impl PointSource, RecordingSurface>) -> Vec<String> {
        h.context()
            .borrow()
            .surface()
            .live
            .iter()
            .map(|(_, spec)| spec.popup.station_code.clone())
            .collect()
    }

    fn event_count(h: &SelectionHandler<impl PointSource, RecordingSurface>) -> usize {
        h.context().borrow().surface().events.len()
    }

    #[tokio::test]
    async fn test_empty_selection_is_noop() {
        let h = handler(TableSource::default().with("ganga", Ok(GANGA)), RacePolicy::default());
        h.on_select("ganga").await;
        let before = event_count(&h);

        assert_eq!(h.on_select("").await, SelectionOutcome::Skipped);
        assert_eq!(h.on_select("   ").await, SelectionOutcome::Skipped);

        assert_eq!(h.source.calls.borrow().len(), 1);
        assert_eq!(event_count(&h), before);
        assert_eq!(live_stations(&h), vec!["G1"]);
    }

    #[tokio::test]
    async fn test_ganga_renders_one_marker() {
        let h = handler(TableSource::default().with("ganga", Ok(GANGA)), RacePolicy::default());
        let outcome = h.on_select("ganga").await;

        match outcome {
            SelectionOutcome::Rendered { markers, summary } => {
                assert_eq!(markers, 1);
                assert_eq!(summary.point_count, 1);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(h.source.calls.borrow().as_slice(), ["ganga"]);

        let ctx = h.context().borrow();
        assert_eq!(ctx.marker_count(), 1);
        let (_, spec) = &ctx.surface().live[0];
        assert_eq!((spec.latitude, spec.longitude), (23.5, 88.3));
        let text = spec.popup.to_text();
        for expected in ["G1", "5", "2", "2023-01-01"] {
            assert!(text.contains(expected), "popup missing {}: {}", expected, text);
        }
    }

    #[tokio::test]
    async fn test_new_selection_clears_before_adding() {
        let source = TableSource::default()
            .with("mahanadi", Ok(MAHANADI))
            .with("ganga", Ok(GANGA));
        let h = handler(source, RacePolicy::default());

        h.on_select("mahanadi").await;
        assert_eq!(live_stations(&h), vec!["M1", "M2"]);
        h.on_select("ganga").await;
        assert_eq!(live_stations(&h), vec!["G1"]);

        let events = h.context().borrow().surface().events.clone();
        assert_eq!(
            events,
            vec![
                SurfaceEvent::Add(1),
                SurfaceEvent::Add(2),
                SurfaceEvent::Remove(1),
                SurfaceEvent::Remove(2),
                SurfaceEvent::Add(3),
            ]
        );
    }

    #[tokio::test]
    async fn test_http_failure_leaves_markers() {
        let source = TableSource::default().with("ganga", Ok(GANGA));
        let h = handler(source, RacePolicy::default());
        h.on_select("ganga").await;
        let before = event_count(&h);

        capture_logs();
        let outcome = h.on_select("nowhere").await;
        assert_eq!(
            outcome,
            SelectionOutcome::Failed(FetchError::Http {
                status: 404,
                region: "nowhere".to_string()
            })
        );
        let errors = logged_errors();
        assert_eq!(errors.len(), 1, "{:?}", errors);
        assert!(errors[0].contains("nowhere") && errors[0].contains("404"));
        assert_eq!(event_count(&h), before);
        assert_eq!(live_stations(&h), vec!["G1"]);
    }

    #[tokio::test]
    async fn test_malformed_json_leaves_markers() {
        let source = TableSource::default()
            .with("ganga", Ok(GANGA))
            .with("broken", Ok("[{\"station_code\": \"B1\","));
        let h = handler(source, RacePolicy::default());
        h.on_select("ganga").await;
        let before = event_count(&h);

        capture_logs();
        assert!(matches!(
            h.on_select("broken").await,
            SelectionOutcome::Failed(FetchError::Parse(_))
        ));
        assert_eq!(logged_errors().len(), 1);
        assert_eq!(event_count(&h), before);
        assert_eq!(live_stations(&h), vec!["G1"]);
    }

    #[tokio::test]
    async fn test_network_failure_then_recovery() {
        let source = TableSource::default()
            .with("offline", Err(FetchError::Network("connection refused".to_string())))
            .with("ganga", Ok(GANGA));
        let h = handler(source, RacePolicy::default());

        capture_logs();
        assert!(matches!(
            h.on_select("offline").await,
            SelectionOutcome::Failed(FetchError::Network(_))
        ));
        assert_eq!(event_count(&h), 0);

        assert!(matches!(
            h.on_select("ganga").await,
            SelectionOutcome::Rendered { markers: 1, .. }
        ));
        assert_eq!(logged_errors().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_response_clears_markers() {
        let source = TableSource::default()
            .with("ganga", Ok(GANGA))
            .with("tapi", Ok(r#"{"error": "No points found"}"#));
        let h = handler(source, RacePolicy::default());
        h.on_select("ganga").await;

        assert!(matches!(
            h.on_select("tapi").await,
            SelectionOutcome::Rendered { markers: 0, .. }
        ));
        assert!(live_stations(&h).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_coordinates_are_skipped() {
        let body = r#"[
            {"station_code":"OK","latitude":20.0,"longitude":86.0},
            {"station_code":"NOLAT","latitude":null,"longitude":86.0},
            {"station_code":"FAR","latitude":95.0,"longitude":86.0}
        ]"#;
        let h = handler(TableSource::default().with("godavari", Ok(body)), RacePolicy::default());
        match h.on_select("godavari").await {
            SelectionOutcome::Rendered { markers, summary } => {
                assert_eq!(markers, 1);
                assert_eq!(summary.point_count, 3);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(live_stations(&h), vec!["OK"]);
    }

    #[tokio::test]
    async fn test_blank_coordinate_skips_only_that_station() {
        let body = r#"[{"station_code":"OK","latitude":20.0,"longitude":86.0},{"station_code":"BAD","latitude":"","longitude":86.0}]"#;
        let h = handler(TableSource::default().with("mahanadi", Ok(body)), RacePolicy::default());

        capture_logs();
        match h.on_select("mahanadi").await {
            SelectionOutcome::Rendered { markers, summary } => {
                assert_eq!(markers, 1);
                assert_eq!(summary.point_count, 2);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(live_stations(&h), vec!["OK"]);
        assert!(logged_errors().is_empty());
    }

    #[tokio::test]
    async fn test_last_resolved_wins() {
        let source = GatedSource::default();
        let tx_ganga = source.gate("ganga");
        let tx_mahanadi = source.gate("mahanadi");
        let h = handler(source, RacePolicy::LastResolved);

        let mut first = Box::pin(h.on_select("ganga"));
        let mut second = Box::pin(h.on_select("mahanadi"));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(futures::poll!(second.as_mut()).is_pending());

        tx_mahanadi.send(Ok(MAHANADI.to_string())).unwrap();
        assert!(matches!(second.await, SelectionOutcome::Rendered { markers: 2, .. }));
        tx_ganga.send(Ok(GANGA.to_string())).unwrap();
        assert!(matches!(first.await, SelectionOutcome::Rendered { markers: 1, .. }));

        assert_eq!(live_stations(&h), vec!["G1"]);
    }

    #[tokio::test]
    async fn test_latest_issued_drops_stale_response() {
        let source = GatedSource::default();
        let tx_ganga = source.gate("ganga");
        let tx_mahanadi = source.gate("mahanadi");
        let h = handler(source, RacePolicy::LatestIssued);

        let mut first = Box::pin(h.on_select("ganga"));
        let mut second = Box::pin(h.on_select("mahanadi"));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(futures::poll!(second.as_mut()).is_pending());

        tx_mahanadi.send(Ok(MAHANADI.to_string())).unwrap();
        assert!(matches!(second.await, SelectionOutcome::Rendered { markers: 2, .. }));
        tx_ganga.send(Ok(GANGA.to_string())).unwrap();
        assert_eq!(first.await, SelectionOutcome::Superseded);

        assert_eq!(live_stations(&h), vec!["M1", "M2"]);
    }
}
