//! Lattice analyses built on top of a motion planner
//!
//! Used by the designer to judge which lattice goals a primitive set can
//! reach: motions to the lattice corners around a continuous goal, and a
//! sweep over the whole extent looking for the sharpest heading change
//! that still produces a motion.

use std::cmp::Reverse;

use itertools::{iproduct, Itertools};
use log::debug;

use crate::common::{DirectedSegment, MotionPlanner, Pose2D, WorldExtent};

use super::angle::AngleQuantizer;

/// A lattice goal and the motion planned to it (empty when infeasible)
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeMotion {
    pub goal: Pose2D,
    pub motion: Vec<Pose2D>,
}

impl LatticeMotion {
    pub fn is_feasible(&self) -> bool {
        !self.motion.is_empty()
    }
}

/// Motions from `start` to the continuous goal and to the four lattice
/// corners (floor/ceil of each coordinate) around it, all keeping the
/// goal's nominal heading.
///
/// The continuous goal comes first, followed by the corners ordered
/// (floor x, floor y), (floor x, ceil y), (ceil x, floor y), (ceil x, ceil y).
pub fn discrete_neighbors<P: MotionPlanner + ?Sized>(
    start: &Pose2D,
    goal: &DirectedSegment,
    planner: &P,
) -> Vec<LatticeMotion> {
    let heading = goal.heading();
    let (gx, gy) = (goal.tail.x, goal.tail.y);

    let corners = iproduct!([gx.floor(), gx.ceil()], [gy.floor(), gy.ceil()])
        .map(|(x, y)| Pose2D::new(x, y, heading));

    std::iter::once(Pose2D::new(gx, gy, heading))
        .chain(corners)
        .map(|goal| LatticeMotion {
            goal,
            motion: planner.plan(start, &goal),
        })
        .collect()
}

/// For every lattice position of `extent`, the feasible motion whose goal
/// heading is the most bins away from the start heading.
///
/// The exactly reversed heading (present when the bin count is even) and the
/// start position itself are skipped. Positions with no feasible heading are
/// left out of the result.
pub fn widest_arcs<P: MotionPlanner + ?Sized>(
    start: &Pose2D,
    extent: &WorldExtent,
    quantizer: &AngleQuantizer,
    planner: &P,
) -> Vec<LatticeMotion> {
    let n = quantizer.num_bins();
    let start_bin = quantizer.discretize(start.yaw);
    let reversed = if n % 2 == 0 {
        Some((start_bin + n / 2) % n)
    } else {
        None
    };

    let candidates: Vec<usize> = (0..n)
        .filter(|&bin| Some(bin) != reversed)
        .sorted_by_key(|&bin| Reverse(quantizer.bin_distance(start_bin, bin)))
        .collect();

    let arcs: Vec<LatticeMotion> = iproduct!(extent.lattice_x_range(), extent.lattice_y_range())
        .map(|(x, y)| (x as f64, y as f64))
        .filter(|&(x, y)| x != start.x || y != start.y)
        .filter_map(|(x, y)| {
            candidates.iter().find_map(|&bin| {
                let goal = Pose2D::new(x, y, quantizer.realize(bin));
                let motion = planner.plan(start, &goal);
                if motion.is_empty() {
                    None
                } else {
                    Some(LatticeMotion { goal, motion })
                }
            })
        })
        .collect();

    debug!(
        "widest arc sweep over {} bins found motions to {} lattice positions",
        n,
        arcs.len()
    );
    arcs
}
