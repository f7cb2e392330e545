//! phonespotter: webcam phone detection with a YOLO model.

use clap::Parser;

use phonespotter::camera::CameraCapture;
use phonespotter::cli::{commands, Args, Command};
use phonespotter::detector::Detector;
use phonespotter::display::PreviewWindow;
use phonespotter::{config, detect_loop, interrupt};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Some(Command::ListCameras) => commands::list_cameras(),
        None => run_detection(&args),
    }
}

fn run_detection(args: &Args) {
    let config = config::load_or_default(args.config.as_deref());
    let settings = args.resolve(&config);

    if let Err(e) = interrupt::install_handler() {
        eprintln!("Warning: Could not set up Ctrl+C handler: {}", e);
    }

    println!("Loading model: {}", settings.model);
    let mut detector = match Detector::load(&settings.model, settings.conf) {
        Ok(detector) => detector,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    let mut camera = match CameraCapture::open(settings.cam) {
        Ok(camera) => camera,
        Err(e) => {
            println!("ERROR: Cannot open camera index {}: {}", settings.cam, e);
            return;
        }
    };

    println!("Camera opened. Press 'q' to quit.");

    let mut window = if settings.show {
        let (width, height) = camera.resolution();
        match PreviewWindow::open(width, height) {
            Ok(window) => Some(window),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                return;
            }
        }
    } else {
        None
    };

    let mut stdout = std::io::stdout().lock();
    match detect_loop::run_loop(&mut camera, &mut detector, window.as_mut(), &mut stdout) {
        Ok(summary) => {
            log::info!(
                "processed {} frames ({} with a phone)",
                summary.frames,
                summary.phone_frames
            );
        }
        Err(e) => eprintln!("ERROR: {}", e),
    }

    // Camera stream and window are released by their Drop impls.
    println!("Exiting.");
}
