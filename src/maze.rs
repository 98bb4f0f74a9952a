use std::{fmt::Display, str::FromStr};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::North if self.y > 0 => Some(Self::new(self.x, self.y - 1)),
            Direction::South => Some(Self::new(self.x, self.y + 1)),
            Direction::East => Some(Self::new(self.x + 1, self.y)),
            Direction::West if self.x > 0 => Some(Self::new(self.x - 1, self.y)),
            _ => None,
        }
    }

    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_aligned_with(&self, other: &Position) -> bool {
        self.x == other.x || self.y == other.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir_char = match self {
            Direction::North => '^',
            Direction::South => 'v',
            Direction::East => '>',
            Direction::West => '<',
        };

        write!(f, "{}", dir_char)
    }
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ];

        &ALL_DIRECTIONS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Wall,
    Start,
    End,
}

impl TryFrom<char> for CellKind {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(CellKind::Empty),
            '#' => Ok(CellKind::Wall),
            'S' => Ok(CellKind::Start),
            'E' => Ok(CellKind::End),
            other => Err(Error::InvalidCharForMap(other)),
        }
    }
}

impl Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind_char = match self {
            CellKind::Empty => '.',
            CellKind::Wall => '#',
            CellKind::Start => 'S',
            CellKind::End => 'E',
        };

        write!(f, "{}", kind_char)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub g_cost: Option<usize>,
    pub h_cost: usize,
    pub approach_dir: Option<Direction>,
    pub parent: Option<usize>,
    pub on_path: bool,
}

impl SearchState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    kind: CellKind,
    pos: Position,
    pub(crate) state: SearchState,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.kind, self.state.approach_dir) {
            (CellKind::Empty, Some(dir)) if self.state.on_path => write!(f, "{}", dir),
            (kind, _) => write!(f, "{}", kind),
        }
    }
}

impl Cell {
    pub fn new(kind: CellKind, pos: Position) -> Self {
        Self {
            kind,
            pos,
            state: SearchState::default(),
        }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_wall(&self) -> bool {
        self.kind == CellKind::Wall
    }
}

#[derive(Debug, Clone)]
pub struct Maze {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl FromStr for Maze {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = MazeBuilder::new();
        for line in s.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

impl Maze {
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .map(|pos| Cell::new(CellKind::Empty, pos))
            .collect();

        Self {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, pos: &Position) -> Option<&Cell> {
        self.pos_to_ind(pos).and_then(|ind| self.cells.get(ind))
    }

    pub fn set_kind(&mut self, pos: &Position, kind: CellKind) -> bool {
        if let Some(cell) = self.pos_to_ind(pos).and_then(|ind| self.cells.get_mut(ind)) {
            cell.kind = kind;
            true
        } else {
            false
        }
    }

    pub fn position_iter(&self, kind: CellKind) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(move |cell| cell.kind == kind)
            .map(|cell| cell.pos)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub(crate) fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if self.is_inside(pos) {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    fn is_inside(&self, pos: &Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }
}

#[derive(Debug)]
pub struct MazeBuilder {
    cells: Vec<Cell>,
    row_n: usize,
    col_n: Option<usize>,
    start_pos: Option<Position>,
    end_pos: Option<Position>,
}

impl Default for MazeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeBuilder {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            row_n: 0,
            col_n: None,
            start_pos: None,
            end_pos: None,
        }
    }

    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        if text.is_empty() {
            return Ok(());
        }

        let this_col_n = text.chars().count();
        let col_n = *self.col_n.get_or_insert(this_col_n);
        if col_n != this_col_n {
            return Err(Error::InconsistentRow(col_n, this_col_n));
        }

        for (ind, c) in text.chars().enumerate() {
            let pos = Position::new(ind, self.row_n);
            let kind = CellKind::try_from(c)?;
            match kind {
                CellKind::Start => {
                    if let Some(last_pos) = self.start_pos {
                        return Err(Error::MultipleStartPosition(last_pos, pos));
                    }

                    self.start_pos = Some(pos);
                }
                CellKind::End => {
                    if let Some(last_pos) = self.end_pos {
                        return Err(Error::MultipleEndPosition(last_pos, pos));
                    }

                    self.end_pos = Some(pos);
                }
                CellKind::Empty | CellKind::Wall => (),
            }
            self.cells.push(Cell::new(kind, pos));
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Maze, Error> {
        let Some(width) = self.col_n else {
            return Err(Error::EmptyMap);
        };
        if self.start_pos.is_none() {
            return Err(Error::NoStartPosition);
        }
        if self.end_pos.is_none() {
            return Err(Error::NoEndPosition);
        }

        Ok(Maze {
            cells: self.cells,
            width,
            height: self.row_n,
        })
    }
}
