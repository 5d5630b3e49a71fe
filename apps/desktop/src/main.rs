use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use geolocation::{FixedRouteLocationProvider, GeoSample};
use resume_source::HttpResumeSource;
use shared::domain::{Resume, Rgba};
use tracing::info;
use viewer_core::{LoadState, LocationState, ViewerConfig, ViewerOrchestrator};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: String,
    /// Document identifier to look up.
    #[arg(long, default_value = "ADITYA KASOUDHAN")]
    name: String,
    /// Stand-in for the platform's location permission grant.
    #[arg(long)]
    location_granted: bool,
    /// How many location samples to print before exiting.
    #[arg(long, default_value_t = 5)]
    location_samples: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let source = Arc::new(HttpResumeSource::new(&args.server_url)?);
    let locations = Arc::new(FixedRouteLocationProvider::new(
        vec![
            GeoSample::new(40.7128, -74.0060),
            GeoSample::new(40.7306, -73.9352),
            GeoSample::new(40.7484, -73.9857),
        ],
        Duration::from_secs(1),
    ));

    let orchestrator =
        ViewerOrchestrator::new(source, locations, ViewerConfig::for_document(&args.name));

    let mut load = orchestrator.subscribe_load_state();
    let state = loop {
        let state = load.borrow_and_update().clone();
        match state {
            LoadState::Loading => load.changed().await?,
            terminal => break terminal,
        }
    };
    match state {
        LoadState::Loaded(resume) => print_resume(&resume),
        LoadState::Failed(message) => println!("{message}"),
        LoadState::Loading => {}
    }

    orchestrator.set_font_size(20.0);
    orchestrator.set_font_color(Rgba::from_rgb(0x20, 0x20, 0x20));
    orchestrator.set_background_color(Rgba::WHITE);
    let font_size = *orchestrator.subscribe_font_size().borrow();
    let font_color = *orchestrator.subscribe_font_color().borrow();
    let background = *orchestrator.subscribe_background_color().borrow();
    println!(
        "display: font {font_size}pt, color #{:02X}{:02X}{:02X}, background #{:02X}{:02X}{:02X}",
        font_color.r, font_color.g, font_color.b, background.r, background.g, background.b
    );

    if args.location_granted {
        info!("location permission granted; starting updates");
        orchestrator.start_location_updates();

        let mut location = orchestrator.subscribe_location();
        let mut printed = 0;
        while printed < args.location_samples {
            location.changed().await?;
            match location.borrow_and_update().clone() {
                LocationState::Sample(sample) => {
                    println!("Lat: {:.2}, Lon: {:.2}", sample.latitude, sample.longitude);
                    printed += 1;
                }
                LocationState::Failed(reason) => {
                    println!("location unavailable: {reason}");
                    break;
                }
                LocationState::Unknown => {}
            }
        }
    }

    orchestrator.shutdown();
    Ok(())
}

fn print_resume(resume: &Resume) {
    println!("{}", resume.name);
    println!("{}", resume.phone);
    println!("{}", resume.email);
    println!("{}", resume.twitter);
    println!("{}", resume.address);
    println!();
    println!("SKILLS");
    for skill in &resume.skills {
        println!("  - {skill}");
    }
    println!();
    println!("PROJECTS");
    for project in &resume.projects {
        println!("  - {} ({}-{})", project.title, project.start_date, project.end_date);
        println!("    {}", project.description);
    }
    println!();
    println!("SUMMARY");
    println!("{}", resume.summary);
}
