use std::{
    error,
    fmt::Display,
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

pub mod maze;
pub mod pathfinder;

pub use maze::{Cell, CellKind, Direction, Maze, MazeBuilder, Position, SearchState};
pub use pathfinder::{solve, PathResult, PathStep};

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    MultipleStartPosition(Position, Position),
    MultipleEndPosition(Position, Position),
    InvalidCharForMap(char),
    EmptyMap,
    NoStartPosition,
    NoEndPosition,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::MultipleStartPosition(last_pos, pos) => write!(
                f,
                "Expect only one start position, given two({}, {}).",
                last_pos, pos
            ),
            Error::MultipleEndPosition(last_pos, pos) => write!(
                f,
                "Expect only one end position, given two({}, {}).",
                last_pos, pos
            ),
            Error::InvalidCharForMap(c) => write!(f, "Invalid character({}) for map.", c),
            Error::EmptyMap => write!(f, "No rows in map."),
            Error::NoStartPosition => write!(f, "No start position in map."),
            Error::NoEndPosition => write!(f, "No end position in map."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(short, long)]
    pub print_map: bool,
}

#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub maze: &'a Maze,
    pub result: &'a PathResult,
    pub solve_ms: u128,
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Dimensions: {} x {}",
            self.maze.width(),
            self.maze.height()
        )?;
        writeln!(
            f,
            "Solved in: {} ms. Search count: {}",
            self.solve_ms, self.result.visited_count
        )?;
        if let Some(cost) = self.result.total_cost {
            writeln!(f, "Best path cost {} points", cost)?;
        }

        Ok(())
    }
}

impl Report<'_> {
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(&path, format!("{}{}", self, self.maze)).with_context(|| {
            format!(
                "Failed to write report to given file({}).",
                path.as_ref().display()
            )
        })?;
        info!("Wrote report to {}.", path.as_ref().display());

        Ok(())
    }
}

pub fn read_maze<P: AsRef<Path>>(path: P) -> Result<Maze> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = MazeBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder
            .add_row(line.as_str())
            .with_context(|| format!("Invalid row at line {}.", ind + 1))?;
    }

    let maze = builder.build()?;
    info!(
        "Loaded {}x{} maze from {}.",
        maze.width(),
        maze.height(),
        path.as_ref().display()
    );

    Ok(maze)
}
