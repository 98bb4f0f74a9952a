use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use log::{debug, trace};

use crate::{
    maze::{CellKind, Direction, Maze, Position},
    Error,
};

pub const STEP_COST: usize = 1;
pub const TURN_COST: usize = 1000;
pub const START_DIR: Direction = Direction::East;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub pos: Position,
    pub dir: Direction,
}

impl PathStep {
    pub fn new(pos: Position, dir: Direction) -> Self {
        Self { pos, dir }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub total_cost: Option<usize>,
    pub visited_count: usize,
    /// Steps from start to end inclusive. The first step holds the start
    /// facing, every later one the direction used to enter its cell.
    pub path: Vec<PathStep>,
}

impl PathResult {
    pub fn is_reachable(&self) -> bool {
        self.total_cost.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FrontierEntry {
    f_cost: usize,
    h_cost: usize,
    seq: usize,
    g_cost: usize,
    cell_ind: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.h_cost.cmp(&other.h_cost))
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn heuristic(pos: &Position, dir: Option<Direction>, end: &Position) -> usize {
    let desired_dir = if pos.x < end.x {
        Direction::East
    } else if pos.x > end.x {
        Direction::West
    } else if pos.y < end.y {
        Direction::South
    } else {
        Direction::North
    };

    let mut turn_cost = if dir != Some(desired_dir) { TURN_COST } else { 0 };
    if !pos.is_aligned_with(end) {
        turn_cost += TURN_COST;
    }

    pos.manhattan_distance(end) + turn_cost
}

pub fn solve(maze: &mut Maze) -> Result<PathResult, Error> {
    let ((start_ind, start_pos), (end_ind, end_pos)) = reset_and_locate_endpoints(maze)?;
    debug!(
        "Searching {}x{} maze from {} to {}.",
        maze.width(),
        maze.height(),
        start_pos,
        end_pos
    );

    let start_h_cost = heuristic(&start_pos, Some(START_DIR), &end_pos);
    let start = &mut maze.cells_mut()[start_ind];
    start.state.g_cost = Some(0);
    start.state.h_cost = start_h_cost;
    start.state.approach_dir = Some(START_DIR);

    let mut visited_count = 1;
    let mut seq = 0;
    let mut frontier = BinaryHeap::from([Reverse(FrontierEntry {
        f_cost: start_h_cost,
        h_cost: start_h_cost,
        seq,
        g_cost: 0,
        cell_ind: start_ind,
    })]);
    let mut total_cost = None;
    while let Some(Reverse(entry)) = frontier.pop() {
        let cur = &maze.cells()[entry.cell_ind];
        if cur.state.g_cost != Some(entry.g_cost) {
            continue;
        }

        if entry.cell_ind == end_ind {
            total_cost = Some(entry.g_cost);
            break;
        }

        let cur_pos = *cur.pos();
        let cur_dir = cur.state.approach_dir;
        trace!(
            "Expanding {} (g: {}, h: {}, facing: {:?}).",
            cur_pos,
            entry.g_cost,
            entry.h_cost,
            cur_dir
        );
        for &dir in Direction::all_dirs() {
            let Some(next_ind) = cur_pos
                .neighbor(dir)
                .and_then(|next_pos| maze.pos_to_ind(&next_pos))
            else {
                continue;
            };

            let next = &mut maze.cells_mut()[next_ind];
            if next.is_wall() {
                continue;
            }

            let move_cost = if cur_dir == Some(dir) {
                STEP_COST
            } else {
                STEP_COST + TURN_COST
            };
            let g_cost = entry.g_cost + move_cost;
            if next
                .state
                .g_cost
                .map_or(true, |last_g_cost| g_cost < last_g_cost)
            {
                let h_cost = heuristic(next.pos(), Some(dir), &end_pos);
                next.state.g_cost = Some(g_cost);
                next.state.h_cost = h_cost;
                next.state.approach_dir = Some(dir);
                next.state.parent = Some(entry.cell_ind);

                seq += 1;
                frontier.push(Reverse(FrontierEntry {
                    f_cost: g_cost + h_cost,
                    h_cost,
                    seq,
                    g_cost,
                    cell_ind: next_ind,
                }));
                visited_count += 1;
            }
        }
    }

    let path = if total_cost.is_some() {
        mark_path(maze, start_ind, end_ind)
    } else {
        Vec::new()
    };
    debug!(
        "Search finished, cost: {:?}, search count: {}, path length: {}.",
        total_cost,
        visited_count,
        path.len()
    );

    Ok(PathResult {
        total_cost,
        visited_count,
        path,
    })
}

impl Maze {
    pub fn solve(&mut self) -> Result<PathResult, Error> {
        solve(self)
    }
}

fn reset_and_locate_endpoints(
    maze: &mut Maze,
) -> Result<((usize, Position), (usize, Position)), Error> {
    let mut start: Option<(usize, Position)> = None;
    let mut end: Option<(usize, Position)> = None;
    for (ind, cell) in maze.cells_mut().iter_mut().enumerate() {
        cell.state.reset();
        let pos = *cell.pos();
        match cell.kind() {
            CellKind::Start => {
                if let Some((_, last_pos)) = start.replace((ind, pos)) {
                    return Err(Error::MultipleStartPosition(last_pos, pos));
                }
            }
            CellKind::End => {
                if let Some((_, last_pos)) = end.replace((ind, pos)) {
                    return Err(Error::MultipleEndPosition(last_pos, pos));
                }
            }
            CellKind::Empty | CellKind::Wall => (),
        }
    }

    let start = start.ok_or(Error::NoStartPosition)?;
    let end = end.ok_or(Error::NoEndPosition)?;
    Ok((start, end))
}

fn mark_path(maze: &mut Maze, start_ind: usize, end_ind: usize) -> Vec<PathStep> {
    let cells = maze.cells_mut();
    let mut steps = Vec::new();
    let mut cur_ind = Some(end_ind);
    while let Some(ind) = cur_ind {
        let cell = &mut cells[ind];
        if let Some(dir) = cell.state.approach_dir {
            steps.push(PathStep::new(*cell.pos(), dir));
        }
        if ind == start_ind {
            break;
        }

        cell.state.on_path = true;
        cur_ind = cell.state.parent;
    }

    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(f_cost: usize, h_cost: usize, seq: usize) -> Reverse<FrontierEntry> {
        Reverse(FrontierEntry {
            f_cost,
            h_cost,
            seq,
            g_cost: f_cost - h_cost,
            cell_ind: seq,
        })
    }

    fn pop_order(entries: Vec<Reverse<FrontierEntry>>) -> Vec<usize> {
        let mut frontier = BinaryHeap::from(entries);
        let mut order = Vec::new();
        while let Some(Reverse(entry)) = frontier.pop() {
            order.push(entry.seq);
        }

        order
    }

    #[test]
    fn frontier_pops_lowest_f_first() {
        assert_eq!(
            pop_order(vec![entry(1010, 5, 0), entry(1003, 1003, 1), entry(7, 2, 2)]),
            vec![2, 1, 0]
        );
    }

    #[test]
    fn frontier_breaks_f_ties_by_lower_h() {
        assert_eq!(
            pop_order(vec![entry(1005, 1005, 0), entry(1005, 4, 1), entry(1005, 1001, 2)]),
            vec![1, 2, 0]
        );
    }

    #[test]
    fn frontier_breaks_full_ties_by_push_order() {
        assert_eq!(
            pop_order(vec![entry(12, 3, 2), entry(12, 3, 0), entry(12, 3, 1)]),
            vec![0, 1, 2]
        );
    }
}
