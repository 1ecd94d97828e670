// Hotel Room Allocator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/hotel-room-allocator --book 3
// ```
//
// Or with a scripted session:
//
// ```console
// $ ./target/release/hotel-room-allocator --random --seed 7 --book 4 --book 2 --show-rooms --output-format text
// ```

use anyhow::Context;
use clap::Parser;
use hotel_room_allocator::booking::{
    render_floor_grid, BookingOutcome, BookingService, LoggingConfig, LoggingError,
    LoggingGuard, OccupancyStatistics, RoomListResponse, ServiceError,
};
use hotel_room_allocator::hotel::{HotelLayout, InMemoryRoomStore};
use hotel_room_allocator::types::{CliArgs, HotelConfig, OutputFormat};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use std::process;
use tracing::{error, info, warn};

/// Everything a session prints in JSON mode
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionReport {
    /// Rooms booked by random occupancy, when it ran
    #[serde(skip_serializing_if = "Option::is_none")]
    randomly_booked: Option<usize>,
    /// One outcome per booking request, in order
    outcomes: Vec<BookingOutcome>,
    /// Occupancy after the session
    statistics: OccupancyStatistics,
    /// Every room, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    rooms: Option<RoomListResponse>,
}

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match HotelConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let _logging_guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        report_failure(&e);
        process::exit(1);
    }
}

/// Log a failed session, tagging service errors with their category
fn report_failure(e: &anyhow::Error) {
    match e.downcast_ref::<ServiceError>() {
        Some(service_error) => {
            error!(
                category = service_error.category(),
                recoverable = service_error.is_recoverable(),
                "{:#}",
                e
            );
            eprintln!("{} error: {:#}", service_error.category(), e);
            if service_error.is_recoverable() {
                eprintln!("The failure may be transient; rerunning the session can succeed.");
            }
        }
        None => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
        }
    }
}

fn init_logging(args: &CliArgs) -> Result<LoggingGuard, LoggingError> {
    let config = LoggingConfig::from_flags(args.verbose, args.debug);
    match &args.log_dir {
        Some(directory) => config.with_log_directory(directory).init(),
        None => config.init(),
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let dry_run = args.dry_run;

    let config = HotelConfig::from_cli_args(args)
        .map_err(ServiceError::from)
        .context("Failed to load configuration")?;
    config.validate().map_err(ServiceError::from).context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no rooms will be touched.");
        eprintln!("{}", config.print_json().map_err(ServiceError::from)?);
        return Ok(());
    }

    let format = config
        .get_output_format()
        .map_err(anyhow::Error::msg)
        .context("Invalid output format")?;

    let store = open_store(config.state_file.as_deref())?;
    let service = BookingService::from_config(store, &config);

    let report = run_session(&service, &config)?;

    if let Some(path) = &config.state_file {
        service
            .store()
            .save_to_file(path)
            .map_err(ServiceError::from)
            .with_context(|| format!("Failed to save room state to {}", path))?;
        info!("Room state saved to {}", path);
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(ServiceError::from)?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", render_text(&report)),
    }

    Ok(())
}

/// Load the room store from a state file, or seed a fresh hotel
fn open_store(state_file: Option<&str>) -> anyhow::Result<InMemoryRoomStore> {
    let store = match state_file {
        Some(path) if Path::new(path).exists() => InMemoryRoomStore::load_from_file(path)
            .map_err(ServiceError::from)
            .with_context(|| format!("Failed to load room state from {}", path))?,
        Some(path) => {
            info!("State file {} does not exist yet, starting from a fresh hotel", path);
            InMemoryRoomStore::new()
        }
        None => InMemoryRoomStore::new(),
    };

    HotelLayout::canonical()
        .seed_if_empty(&store)
        .map_err(ServiceError::from)
        .context("Failed to seed rooms")?;
    Ok(store)
}

/// Run reset, random occupancy and every booking request in order
fn run_session(
    service: &BookingService<InMemoryRoomStore>,
    config: &HotelConfig,
) -> anyhow::Result<SessionReport> {
    if config.reset {
        service.reset_all().map_err(ServiceError::from).context("Reset failed")?;
    }

    let randomly_booked = if config.random_occupy {
        Some(
            service
                .random_occupy()
                .map_err(ServiceError::from)
                .context("Random occupancy failed")?,
        )
    } else {
        None
    };

    let outcomes: Vec<BookingOutcome> =
        config.bookings.iter().map(|&count| service.book_rooms(count)).collect();

    let failed = outcomes.iter().filter(|outcome| !outcome.success).count();
    if failed > 0 {
        warn!("{} of {} booking requests were not satisfied", failed, outcomes.len());
    }

    let rooms =
        service.get_all_rooms().map_err(ServiceError::from).context("Failed to list rooms")?;
    let statistics = OccupancyStatistics::from_rooms(&rooms);
    info!("{}", statistics.summary());

    Ok(SessionReport {
        randomly_booked,
        outcomes,
        statistics,
        rooms: config.show_rooms.then(|| RoomListResponse { success: true, rooms }),
    })
}

/// Human-readable session report
fn render_text(report: &SessionReport) -> String {
    let mut text = String::new();

    if let Some(booked) = report.randomly_booked {
        text.push_str(&format!("Random occupancy booked {} rooms\n", booked));
    }

    for outcome in &report.outcomes {
        if outcome.success {
            let numbers: Vec<String> =
                outcome.room_numbers().iter().map(|n| n.to_string()).collect();
            text.push_str(&format!("{}: {}\n", outcome.message, numbers.join(", ")));
        } else {
            text.push_str(&format!("Booking failed: {}\n", outcome.message));
        }
    }

    text.push_str(&report.statistics.summary());
    text.push('\n');

    if let Some(listing) = &report.rooms {
        // Highlight the rooms taken by the last successful request
        let fresh: HashSet<_> = report
            .outcomes
            .iter()
            .rev()
            .find(|outcome| outcome.success)
            .and_then(|outcome| outcome.booked_rooms.as_ref())
            .map(|rooms| rooms.iter().map(|room| room.id).collect())
            .unwrap_or_default();

        text.push('\n');
        text.push_str(&render_floor_grid(&listing.rooms, &fresh));
    }

    text
}
