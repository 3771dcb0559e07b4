use geonav_core::{FrameSource, GeoPoint, Homography, MotionEstimationError, MotionEstimator};
use geonav_geodesy::Ellipsoid;
use geonav_odometry::{DeadReckoning, OdometrySettings, TrackingLoop};
use geonav_tile::{export_training_tiles, TileGrid};
use log::*;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Clone)]
#[structopt(
    name = "geonav-sandbox",
    about = "A tool for replaying recorded flights against the dead-reckoning core"
)]
struct Opt {
    /// The file where odometry settings are specified.
    ///
    /// This is in the format of `geonav_odometry::OdometrySettings`.
    #[structopt(short, long, default_value = "odometry-settings.json")]
    settings: PathBuf,
    /// Starting latitude in degrees
    #[structopt(long, default_value = "32.09237848")]
    latitude: f64,
    /// Starting longitude in degrees
    #[structopt(long, default_value = "35.17513055")]
    longitude: f64,
    /// Starting altitude in meters
    #[structopt(long, default_value = "564.05338779")]
    altitude: f64,
    /// Frame width in pixels of the recorded video
    #[structopt(long, default_value = "1280")]
    frame_width: u32,
    /// Frame height in pixels of the recorded video
    #[structopt(long, default_value = "720")]
    frame_height: u32,
    /// Integrate one step per this many frames
    #[structopt(long, default_value = "10")]
    sample_interval: usize,
    /// Output file for the dead-reckoned geodetic waypoints
    #[structopt(short, long)]
    output: Option<PathBuf>,
    /// Reference map image to split into training tiles
    #[structopt(long)]
    map: Option<PathBuf>,
    /// Tiles along the map's minimum dimension
    #[structopt(long, default_value = "6")]
    map_tiles: u32,
    /// Directory that receives the training tiles
    #[structopt(long, default_value = "training-tiles")]
    tile_directory: PathBuf,
    /// Homography log recorded from an external motion estimator
    ///
    /// A JSON array with one entry per frame-to-frame step: a row-major
    /// 3x3 matrix, or null where the estimator failed on that step.
    #[structopt(parse(from_os_str))]
    motion_log: PathBuf,
}

/// Frames of a recorded flight are just stream indices; all pixel content
/// was consumed when the homography log was recorded.
struct RecordedFlight {
    next: usize,
    frames: usize,
}

impl FrameSource for RecordedFlight {
    type Frame = usize;

    fn next_frame(&mut self) -> Option<usize> {
        if self.next < self.frames {
            let frame = self.next;
            self.next += 1;
            Some(frame)
        } else {
            None
        }
    }
}

/// Replays a homography log. Entry `j` maps frame `j` onto frame `j + 1`;
/// the transform between two sampled frames is the chain of every
/// per-frame entry in between, and a missing entry anywhere in the span
/// fails the step exactly as the original estimator did.
struct RecordedMotion {
    steps: Vec<Option<Homography>>,
}

impl MotionEstimator<usize> for RecordedMotion {
    fn estimate_motion(
        &self,
        previous: &usize,
        current: &usize,
    ) -> Result<Homography, MotionEstimationError> {
        let mut chained = Homography::identity();
        for step in *previous..*current {
            let entry = self
                .steps
                .get(step)
                .copied()
                .flatten()
                .ok_or(MotionEstimationError::MissingRecord)?;
            chained = entry * chained;
        }
        Ok(chained)
    }
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let settings = std::fs::File::open(&opt.settings)
        .ok()
        .and_then(|file| serde_json::from_reader(file).ok());
    if settings.is_some() {
        info!("loaded existing settings");
    } else {
        info!("used default settings");
    }
    let settings: OdometrySettings = settings.unwrap_or_default();

    if let Some(map_path) = &opt.map {
        info!("splitting map {} into training tiles", map_path.display());
        let map = image::open(map_path).expect("failed to load map image");
        let grid = TileGrid::from_image(&map, opt.map_tiles).expect("failed to build tile grid");
        export_training_tiles(&map, &grid, &opt.tile_directory)
            .expect("failed to export training tiles");
    }

    let raw: Vec<Option<[[f64; 3]; 3]>> = {
        let file = std::fs::File::open(&opt.motion_log).expect("failed to open motion log");
        serde_json::from_reader(file).expect("failed to parse motion log")
    };
    let steps: Vec<Option<Homography>> = raw
        .into_iter()
        .map(|entry| {
            entry.map(|rows| {
                Homography::from_row_major([
                    rows[0][0], rows[0][1], rows[0][2], //
                    rows[1][0], rows[1][1], rows[1][2], //
                    rows[2][0], rows[2][1], rows[2][2],
                ])
            })
        })
        .collect();
    info!("loaded {} recorded motion steps", steps.len());

    let mut source = RecordedFlight {
        next: 0,
        frames: steps.len() + 1,
    };
    let estimator = RecordedMotion { steps };
    let origin = GeoPoint::new(opt.latitude, opt.longitude, opt.altitude);
    let mut reckoning = DeadReckoning::new(
        Ellipsoid::WGS84,
        origin,
        opt.frame_width,
        opt.frame_height,
        settings,
    );

    let report = TrackingLoop::new(opt.sample_interval).run(&mut source, &estimator, &mut reckoning);
    info!(
        "{} frames: {} waypoints appended, {} steps below threshold, {} steps failed",
        report.frames_seen, report.steps_accepted, report.steps_rejected, report.steps_failed
    );

    let waypoints = reckoning.geodetic_waypoints();
    if let Some(path) = opt.output {
        let file = std::fs::File::create(&path).expect("failed to create output file");
        serde_json::to_writer_pretty(file, &waypoints).expect("failed to write waypoints");
        info!("wrote {} waypoints to {}", waypoints.len(), path.display());
    } else {
        for waypoint in &waypoints {
            info!(
                "{:.8}, {:.8}, {:.3}",
                waypoint.latitude, waypoint.longitude, waypoint.altitude
            );
        }
    }
}
