use std::convert::Infallible;
use std::net::TcpListener;
use std::path::Path;

use log::{error, info};
use warp::Filter;

use lookout_hunter::config::Config;
use lookout_hunter::facility_store::FacilityStore;
use lookout_hunter::scheduler::SnapshotScheduler;
use lookout_hunter::snapshot_loader;
use lookout_hunter::warp_helpers::{cors, handle_rejection, with_store};
use lookout_hunter::{handlers_facility, handlers_filter, handlers_health};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let port = config.port;

    info!("Starting Lookout Hunter server on port {}", port);
    info!("Availability snapshot URL: {}", config.availability_url);
    if let Some(path) = &config.snapshot_path {
        info!("Local snapshot override: {}", path);
    }

    // Check if the port is available BEFORE fetching the snapshot
    if !is_port_available(port) {
        error!(
            "Port {} is already in use. Please stop any existing Lookout Hunter instances or use a different port.",
            port
        );
        return Err(format!("Port {} is already in use", port).into());
    }

    let store = FacilityStore::empty();
    load_initial_snapshot(&config, &store);

    let _scheduler_handle = SnapshotScheduler::new(
        store.clone(),
        config.availability_url.clone(),
        config.refresh_interval_hours,
    )
    .start();

    let health_routes = build_health_routes(store.clone());
    let facility_routes = build_facility_routes(store.clone());
    let match_routes = build_match_routes(store);
    let static_routes = build_static_routes();

    let routes = health_routes
        .or(facility_routes)
        .or(match_routes)
        .or(static_routes)
        .with(cors())
        .with(warp::log("lookout_hunter"))
        .recover(handle_rejection);

    info!(
        "Server started successfully, listening on http://localhost:{}",
        port
    );

    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}

fn is_port_available(port: u16) -> bool {
    TcpListener::bind(("0.0.0.0", port)).is_ok()
}

// A failed initial load is not fatal: the API responds 503 until the next
// scheduled refresh succeeds
fn load_initial_snapshot(config: &Config, store: &FacilityStore) {
    let loaded = match &config.snapshot_path {
        Some(path) => snapshot_loader::load_snapshot_file(Path::new(path)),
        None => snapshot_loader::fetch_snapshot(&config.availability_url),
    };

    match loaded {
        Ok(facilities) => {
            store.replace(facilities);
            info!("Facility snapshot loaded: {} facilities", store.len());
        }
        Err(e) => error!("Initial snapshot load failed: {}", e),
    }
}

fn build_health_routes(
    store: FacilityStore,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let health = warp::path("health")
        .and(warp::get())
        .and_then(handlers_health::health_check);

    let ready = warp::path("ready")
        .and(warp::get())
        .and(with_store(store))
        .and_then(handlers_health::ready_check);

    health.or(ready)
}

fn build_facility_routes(
    store: FacilityStore,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let api_facilities_list = warp::path("api")
        .and(warp::path("facilities"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handlers_facility::list_facilities);

    let api_facility_get = warp::path("api")
        .and(warp::path("facilities"))
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handlers_facility::get_facility);

    let api_meta = warp::path("api")
        .and(warp::path("meta"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store))
        .and_then(handlers_facility::snapshot_meta);

    api_facilities_list.or(api_facility_get).or(api_meta)
}

fn build_match_routes(
    store: FacilityStore,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path("api")
        .and(warp::path("matches"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<handlers_filter::MatchQuery>())
        .and(with_store(store))
        .and_then(handlers_filter::facility_matches)
}

fn build_static_routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone
{
    let static_index = warp::path::end().and(warp::get()).and_then(|| async {
        Ok::<_, Infallible>(warp::reply::html(include_str!("../static/index.html")))
    });

    let static_css_main = warp::path("css")
        .and(warp::path("main.css"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(|| async {
            Ok::<_, Infallible>(warp::reply::with_header(
                include_str!("../static/css/main.css"),
                "content-type",
                "text/css",
            ))
        });

    let static_js_api = warp::path("js")
        .and(warp::path("api.js"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(|| async {
            Ok::<_, Infallible>(warp::reply::with_header(
                include_str!("../static/js/api.js"),
                "content-type",
                "application/javascript",
            ))
        });

    let static_js_filters = warp::path("js")
        .and(warp::path("filters.js"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(|| async {
            Ok::<_, Infallible>(warp::reply::with_header(
                include_str!("../static/js/filters.js"),
                "content-type",
                "application/javascript",
            ))
        });

    let static_js_map = warp::path("js")
        .and(warp::path("map.js"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(|| async {
            Ok::<_, Infallible>(warp::reply::with_header(
                include_str!("../static/js/map.js"),
                "content-type",
                "application/javascript",
            ))
        });

    let static_js_app = warp::path("js")
        .and(warp::path("app.js"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(|| async {
            Ok::<_, Infallible>(warp::reply::with_header(
                include_str!("../static/js/app.js"),
                "content-type",
                "application/javascript",
            ))
        });

    static_css_main
        .or(static_js_api)
        .or(static_js_filters)
        .or(static_js_map)
        .or(static_js_app)
        .or(static_index)
}
