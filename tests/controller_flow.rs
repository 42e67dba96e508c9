use compete_insight::adapters::ai::MockAiAdapter;
use compete_insight::domain::{AnalysisReport, AnalysisStatus, BrandList, DomainError, MAX_BRANDS};
use compete_insight::ports::AiPort;
use compete_insight::usecases::AnalysisController;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Wraps the mock adapter and records the controller status seen during the call.
struct ObservingAi {
    inner: MockAiAdapter,
    fail: bool,
    status_rx: Mutex<Option<watch::Receiver<AnalysisStatus>>>,
    seen: Mutex<Vec<AnalysisStatus>>,
}

impl ObservingAi {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            inner: MockAiAdapter::with_delay(0),
            fail,
            status_rx: Mutex::new(None),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn attach(&self, controller: &AnalysisController) {
        *self.status_rx.lock().unwrap() = Some(controller.subscribe());
    }
}

#[async_trait::async_trait]
impl AiPort for ObservingAi {
    async fn analyze_competitors(&self, brands: &[String]) -> Result<AnalysisReport, DomainError> {
        let status = self
            .status_rx
            .lock()
            .unwrap()
            .as_ref()
            .map(|rx| *rx.borrow());
        if let Some(status) = status {
            self.seen.lock().unwrap().push(status);
        }
        if self.fail {
            return Err(DomainError::EmptyResponse);
        }
        self.inner.analyze_competitors(brands).await
    }

    fn model_name(&self) -> &str {
        "observing"
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

#[tokio::test]
async fn single_brand_with_mock_completes() {
    let mut controller = AnalysisController::new(Arc::new(MockAiAdapter::with_delay(0)));
    controller.update_brand(0, "蔚来");

    assert!(controller.submit().await);

    assert_eq!(controller.status(), AnalysisStatus::Completed);
    let report = controller.report().expect("report after completion");
    assert_eq!(report.competitors.len(), 1);
    assert_eq!(report.competitors[0].name, "蔚来");
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn failure_then_restart_returns_to_form() {
    let ai = ObservingAi::new(true);
    let mut controller = AnalysisController::new(ai.clone());
    ai.attach(&controller);
    controller.update_brand(0, "蔚来");

    controller.submit().await;
    assert_eq!(controller.status(), AnalysisStatus::Error);
    assert!(controller.report().is_none());
    assert!(controller.error().is_some());
    assert_eq!(*ai.seen.lock().unwrap(), vec![AnalysisStatus::Analyzing]);

    assert!(controller.restart());
    assert_eq!(controller.status(), AnalysisStatus::Idle);
    assert!(controller.error().is_none());
}

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(usize),
    Edit(usize, String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0usize..7).prop_map(Op::Remove),
        (0usize..7, "[ a-z蔚来]{0,6}").prop_map(|(i, s)| Op::Edit(i, s)),
    ]
}

proptest! {
    #[test]
    fn brand_list_length_stays_in_bounds(ops in prop::collection::vec(op(), 0..40)) {
        let mut brands = BrandList::new();
        for op in ops {
            let before = brands.len();
            match op {
                Op::Add => {
                    let added = brands.add_slot();
                    prop_assert_eq!(added, before < MAX_BRANDS);
                }
                Op::Remove(i) => {
                    let removed = brands.remove_slot(i);
                    prop_assert_eq!(removed, before > 1 && i < before);
                }
                Op::Edit(i, s) => {
                    brands.update_slot(i, s);
                }
            }
            prop_assert!(brands.len() >= 1);
            prop_assert!(brands.len() <= MAX_BRANDS);
        }
    }

    #[test]
    fn submit_always_passes_through_analyzing(
        names in prop::collection::vec("[ a-z蔚来]{0,6}", 1..=MAX_BRANDS),
        keep in 0usize..MAX_BRANDS,
        fail in any::<bool>(),
    ) {
        let ai = ObservingAi::new(fail);
        let mut controller = AnalysisController::new(ai.clone());
        ai.attach(&controller);
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                controller.add_brand();
            }
            controller.update_brand(i, name.clone());
        }
        // Guarantee at least one non-blank entry.
        let slot = keep % names.len();
        controller.update_brand(slot, format!("brand{}", slot));

        let ran = runtime().block_on(controller.submit());

        prop_assert!(ran);
        prop_assert_eq!(ai.seen.lock().unwrap().clone(), vec![AnalysisStatus::Analyzing]);
        let expected = if fail { AnalysisStatus::Error } else { AnalysisStatus::Completed };
        prop_assert_eq!(controller.status(), expected);
        prop_assert_eq!(controller.report().is_some(), !fail);
        prop_assert_eq!(controller.error().is_some(), fail);
    }
}
