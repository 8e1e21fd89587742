//! Two desks, same source, same gestures.
//! They must end in identical state and identical event payloads.

use caseflow_core::{
    case_builder::RawRecord,
    case_store::StatusFilter,
    engine::CaseDesk,
    source::StaticCaseSource,
};

fn build_desk() -> CaseDesk {
    let records = (1..=100)
        .map(|id| RawRecord { user_id: (id % 10) as i64 + 1, id })
        .collect();
    CaseDesk::new(Box::new(StaticCaseSource::Records(records)))
}

async fn drive(desk: &mut CaseDesk) {
    desk.reload().await.expect("reload");
    desk.set_status_filter(StatusFilter::Review).expect("filter");
    desk.select_case(40).expect("select");
    desk.reload().await.expect("reload again");
}

#[tokio::test]
async fn same_source_produces_identical_desks() {
    let mut desk_a = build_desk();
    let mut desk_b = build_desk();
    drive(&mut desk_a).await;
    drive(&mut desk_b).await;

    assert_eq!(desk_a.state(), desk_b.state());
    assert_eq!(desk_a.snapshot(), desk_b.snapshot());

    let log_a: Vec<&str> = desk_a.event_log().iter().map(|e| e.payload.as_str()).collect();
    let log_b: Vec<&str> = desk_b.event_log().iter().map(|e| e.payload.as_str()).collect();
    assert_eq!(log_a, log_b, "Event logs diverged");
}
