use anyhow::Context as _;
use services::{WalkthroughService, WalkthroughSnapshot};
use tracing::{debug, info, warn};
use wayfind_core::model::RouteId;
use wayfind_core::time::format_elapsed;

fn log_instruction(snapshot: &WalkthroughSnapshot) {
    let instruction = &snapshot.instruction;
    info!(
        step = instruction.step_index + 1,
        of = instruction.step_count,
        direction = %instruction.direction,
        distance = instruction.leg_distance,
        "{}",
        instruction.instruction
    );
}

/// Walk `route` without a window, logging until arrival or Ctrl-C.
pub async fn run(service: WalkthroughService, route: &str, speed: f64) -> anyhow::Result<()> {
    let route_id = RouteId::new(route).with_context(|| format!("invalid route id {route:?}"))?;
    let settings = service
        .settings()
        .sped_up(speed)
        .with_context(|| format!("invalid --speed {speed}"))?;
    let service = service.with_settings(settings);
    let session = service.start(&route_id)?;
    let mut snapshots = session.subscribe();

    let mut last = snapshots.borrow_and_update().clone();
    log_instruction(&last);

    while !last.is_arrived() {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    warn!("walkthrough ended before arrival");
                    break;
                }
                let next = snapshots.borrow_and_update().clone();
                if next.instruction.step_index == last.instruction.step_index {
                    debug!(remaining = next.instruction.remaining_distance, "walking");
                } else {
                    log_instruction(&next);
                }
                last = next;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    if let Some(arrived_at) = last.arrived_at {
        info!(
            route = %last.route_name,
            elapsed = %format_elapsed(arrived_at - last.started_at),
            "arrived"
        );
    }
    session.stop().await;
    Ok(())
}

pub fn print_routes(catalog: &services::RouteCatalog) {
    for (id, route) in catalog.list() {
        println!(
            "{:<16} {} ({} steps, {}m)",
            id.as_str(),
            route.name(),
            route.len(),
            route.total_distance()
        );
    }
}
