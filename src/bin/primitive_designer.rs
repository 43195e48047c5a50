// Motion primitive designer
//
// Replays an editing session on the pose lattice and renders a frame after
// every step: free dragging of the start and goal, snapping onto the
// lattice, spin box edits, a bin count change and the lattice sweeps.
//
// Author: Ryohei Sasaki(@rsasaki0109)
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info, warn};

use primitive_designer::common::{Point2D, Pose2D, Visualizable};
use primitive_designer::interaction::{ControlEvent, ControlPanel, InputController, PointerButton};
use primitive_designer::lattice::{discrete_neighbors, widest_arcs};
use primitive_designer::motion::UnicyclePlanner;
use primitive_designer::utils::{Scene, Visualizer};
use primitive_designer::{DesignerConfig, DesignerResult, EditSession};

#[derive(Parser, Debug)]
#[command(name = "primitive_designer", about = "Design unicycle motion primitives on a pose lattice")]
struct Args {
    /// YAML config file (defaults to configs/designer.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for rendered frames
    #[arg(short, long)]
    output: Option<PathBuf>,
}

struct FrameWriter {
    directory: PathBuf,
    width: u32,
    height: u32,
    count: usize,
}

impl FrameWriter {
    fn save(&mut self, scene: &Scene, title: &str) {
        self.count += 1;
        let path = self.directory.join(format!("frame_{:02}.png", self.count));

        let mut vis = Visualizer::for_extent(&scene.extent);
        vis.set_title(title);
        scene.visualize(&mut vis);

        match vis.save_png(&path.to_string_lossy(), self.width, self.height) {
            Ok(()) => info!("saved {} ({})", path.display(), title),
            Err(e) => warn!("failed to save {}: {}", path.display(), e),
        }
    }
}

fn run(args: &Args) -> DesignerResult<()> {
    let config = match &args.config {
        Some(path) => DesignerConfig::load(path)?,
        None => DesignerConfig::load_default()?,
    };

    let directory = args
        .output
        .clone()
        .unwrap_or_else(|| Path::new(&config.output.directory).to_path_buf());
    std::fs::create_dir_all(&directory)?;

    let planner = UnicyclePlanner::new(config.planner.clone())?;
    let mut session = EditSession::from_config(&config)?;
    let mut input = InputController::from_config(&config)?;
    let mut panel = ControlPanel::new(&session);

    let viewport = input.viewport();
    let mut frames = FrameWriter {
        directory,
        width: viewport.width as u32,
        height: viewport.height as u32,
        count: 0,
    };
    let at = |fx: f64, fy: f64| Point2D::new(fx * viewport.width, fy * viewport.height);

    info!("{}", panel.toggle_label(&session));
    frames.save(&Scene::from_session(&session, &planner), "Startup");

    // free editing
    if session.discrete_mode_active() {
        panel.apply(&mut session, ControlEvent::ToggleMode)?;
    }
    input.pointer_down(&mut session, PointerButton::Primary, at(0.32, 0.62));
    input.pointer_move(&mut session, at(0.36, 0.58));
    input.pointer_move(&mut session, at(0.40, 0.55));
    frames.save(&Scene::from_session(&session, &planner), "Dragging start");
    input.pointer_up(&mut session, PointerButton::Primary);

    input.pointer_down(&mut session, PointerButton::Secondary, at(0.71, 0.33));
    input.pointer_move(&mut session, at(0.74, 0.24));
    frames.save(&Scene::from_session(&session, &planner), "Dragging goal");
    input.pointer_up(&mut session, PointerButton::Secondary);

    // lattice editing
    panel.apply(&mut session, ControlEvent::ToggleMode)?;
    info!(
        "snapped start {:?}, goal {:?}",
        session.discrete_start(),
        session.discrete_goal()
    );
    frames.save(&Scene::from_session(&session, &planner), "Snapped to lattice");

    panel.apply(&mut session, ControlEvent::SetGoalAngle(panel.goal_angle.value() + 2))?;
    panel.apply(&mut session, ControlEvent::SetGoalX(panel.goal_x.value() - 1))?;
    frames.save(&Scene::from_session(&session, &planner), "Goal edited");

    panel.apply(&mut session, ControlEvent::SetAngleBinCount(8))?;
    frames.save(&Scene::from_session(&session, &planner), "Eight heading bins");

    // lattice sweeps
    let mut scene = Scene::from_session(&session, &planner);
    let neighbors = discrete_neighbors(&session.start_pose(), session.goal(), &planner);
    scene.add_lattice_motions(&neighbors, input.show_arrows());
    frames.save(&scene, "Goal lattice neighbors");

    let sweep_start = Pose2D::new(0.0, 1.0, 0.0);
    let arcs = widest_arcs(&sweep_start, session.extent(), session.quantizer(), &planner);
    info!("widest arcs reach {} lattice positions", arcs.len());
    let mut scene = Scene::new(*session.extent());
    scene.add_lattice_motions(&arcs, input.show_arrows());
    frames.save(&scene, "Widest arcs");

    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!("Motion primitive designer start!!");
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
    println!("Done!!");
}
