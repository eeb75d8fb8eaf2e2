use navgrid_core::{Location, SquareGrid};

use crate::config::{PartialPolicy, SearchConfig};
use crate::error::SearchError;
use crate::queue::PriorityQueue;
use crate::traits::AstarPather;

/// Outcome of a search.
///
/// `path` always runs from the start to the returned endpoint, both
/// inclusive, and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `true` if `path` ends at the goal; `false` for a partial path.
    pub found: bool,
    pub path: Vec<Location>,
    /// Accumulated cost of the last cell of `path`.
    pub cost: i32,
}

impl SearchResult {
    /// Last cell of the path.
    pub fn end(&self) -> Option<Location> {
        self.path.last().copied()
    }
}

// ---------------------------------------------------------------------------
// Internal per-cell search node
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: i32,
    parent: usize,
    generation: u32,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Reusable weighted A* searcher for one grid.
///
/// The node array is indexed by flattened cell and invalidated lazily by a
/// generation counter, so a search only touches the cells it visits. A
/// `Pathfinder` needs `&mut self` per search; use one per thread.
pub struct Pathfinder {
    width: i32,
    height: i32,
    config: SearchConfig,
    nodes: Vec<Node>,
    generation: u32,
    frontier: PriorityQueue<usize>,
    // cells reached this search, in discovery order
    visited: Vec<usize>,
    nbuf: Vec<Location>,
    start: Location,
    goal: Location,
}

impl Pathfinder {
    /// Create a pathfinder sized for `grid`, with the default config.
    pub fn new(grid: &SquareGrid) -> Self {
        Self::with_config(grid, SearchConfig::default())
    }

    /// Create a pathfinder sized for `grid`.
    ///
    /// One node is allocated per cell, so the cache is bounded by
    /// [`MAX_CELLS`](navgrid_core::grid::MAX_CELLS) like the grid itself.
    pub fn with_config(grid: &SquareGrid, config: SearchConfig) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            config,
            nodes: vec![Node::default(); grid.len()],
            generation: 0,
            frontier: PriorityQueue::new(),
            visited: Vec::new(),
            nbuf: Vec::with_capacity(8),
            start: Location::ZERO,
            goal: Location::ZERO,
        }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Dimensions the caches are currently laid out for.
    #[inline]
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Start of the most recent search.
    #[inline]
    pub fn start(&self) -> Location {
        self.start
    }

    /// Goal of the most recent search.
    #[inline]
    pub fn goal(&self) -> Location {
        self.goal
    }

    /// Search for a lowest-cost path from `start` to `goal` on `grid`.
    ///
    /// When the goal is unreachable (including when it is a wall) the result
    /// has `found == false` and holds a partial path chosen by the configured
    /// [`PartialPolicy`]. Out-of-bounds endpoints and an impassable start are
    /// reported as [`SearchError`].
    pub fn find_path(
        &mut self,
        grid: &SquareGrid,
        start: Location,
        goal: Location,
    ) -> Result<SearchResult, SearchError> {
        let mut path = Vec::new();
        let found = self.find_path_into(grid, start, goal, &mut path)?;
        Ok(self.result(found, path))
    }

    /// Like [`find_path`](Self::find_path), but writes the path into `path`
    /// (cleared first) and returns whether it reaches the goal.
    pub fn find_path_into(
        &mut self,
        grid: &SquareGrid,
        start: Location,
        goal: Location,
        path: &mut Vec<Location>,
    ) -> Result<bool, SearchError> {
        if !grid.in_bounds(start) {
            return Err(SearchError::StartOutOfBounds(start));
        }
        if !grid.in_bounds(goal) {
            return Err(SearchError::GoalOutOfBounds(goal));
        }
        if !grid.passable(start) {
            return Err(SearchError::StartImpassable(start));
        }
        self.fit(grid.width(), grid.height());
        Ok(self.search(grid, start, goal, path))
    }

    /// Run the search over an arbitrary pather laid out on this
    /// pathfinder's current dimensions.
    ///
    /// Only the bounds of the endpoints are checked; passability is up to
    /// the pather's neighbour enumeration.
    pub fn find_path_with<P: AstarPather>(
        &mut self,
        pather: &P,
        start: Location,
        goal: Location,
    ) -> Result<SearchResult, SearchError> {
        if self.idx(start).is_none() {
            return Err(SearchError::StartOutOfBounds(start));
        }
        if self.idx(goal).is_none() {
            return Err(SearchError::GoalOutOfBounds(goal));
        }
        let mut path = Vec::new();
        let found = self.search(pather, start, goal, &mut path);
        Ok(self.result(found, path))
    }

    /// Accumulated cost of `loc` in the most recent search, if it was reached.
    pub fn cost_at(&self, loc: Location) -> Option<i32> {
        let i = self.idx(loc)?;
        let n = &self.nodes[i];
        (self.generation != 0 && n.generation == self.generation).then_some(n.g)
    }

    /// Predecessor of `loc` on its cheapest known path in the most recent
    /// search. The start is its own predecessor.
    pub fn came_from(&self, loc: Location) -> Option<Location> {
        let i = self.idx(loc)?;
        let n = &self.nodes[i];
        (self.generation != 0 && n.generation == self.generation).then(|| self.point(n.parent))
    }

    /// Number of cells reached by the most recent search.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Relayout the caches for a `width × height` grid.
    ///
    /// If the new size fits within existing capacity the node array is kept
    /// and only the generation is bumped on the next search.
    fn fit(&mut self, width: i32, height: i32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!(
            "pathfinder resized from {}x{} to {width}x{height}",
            self.width,
            self.height
        );
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        if len > self.nodes.len() {
            self.nodes.resize(len, Node::default());
        }
    }

    fn result(&self, found: bool, path: Vec<Location>) -> SearchResult {
        let cost = path
            .last()
            .and_then(|&end| self.cost_at(end))
            .unwrap_or_default();
        SearchResult { found, path, cost }
    }

    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could collide with new ones.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }

    fn search<P: AstarPather>(
        &mut self,
        pather: &P,
        start: Location,
        goal: Location,
        path: &mut Vec<Location>,
    ) -> bool {
        path.clear();
        self.start = start;
        self.goal = goal;
        self.frontier.clear();
        self.visited.clear();
        let cur_gen = self.next_generation();

        let (Some(start_idx), Some(goal_idx)) = (self.idx(start), self.idx(goal)) else {
            path.push(start);
            return false;
        };

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = start_idx;
            node.generation = cur_gen;
            node.open = true;
        }
        self.visited.push(start_idx);

        if start_idx == goal_idx {
            path.push(start);
            return true;
        }

        self.frontier.enqueue(start_idx, 0);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(ci) = self.frontier.dequeue() else {
                break 'search false;
            };

            // Skip stale entries.
            if !self.nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.nodes[ci].open = false;
            expanded += 1;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    self.visited.push(ni);
                }

                n.g = tentative_g;
                n.parent = ci;
                n.open = true;

                self.frontier
                    .enqueue(ni, tentative_g + pather.estimate(np, goal));
            }
        };

        self.nbuf = nbuf;

        log::trace!(
            "search {start} -> {goal}: found={found}, expanded={expanded}, visited={}",
            self.visited.len()
        );

        let end_idx = if found {
            goal_idx
        } else {
            let t = self.partial_terminus(pather, goal);
            log::debug!(
                "no path {start} -> {goal}; partial path ends at {} ({:?})",
                self.point(t),
                self.config.partial
            );
            t
        };

        self.trace_path(start_idx, end_idx, path);
        found
    }

    /// Pick where a partial path ends. Ties go to the earliest discovered cell.
    fn partial_terminus<P: AstarPather>(&self, pather: &P, goal: Location) -> usize {
        let nodes = &self.nodes;
        let best = match self.config.partial {
            PartialPolicy::LowestCost => self.visited.iter().copied().min_by_key(|&i| nodes[i].g),
            PartialPolicy::ClosestToGoal => self
                .visited
                .iter()
                .copied()
                .min_by_key(|&i| (pather.estimate(self.point(i), goal), nodes[i].g)),
        };
        // The start is always visited.
        best.unwrap_or(self.visited[0])
    }

    /// Walk parents from `end_idx` back to the start and write the path in
    /// start-to-end order.
    fn trace_path(&self, start_idx: usize, end_idx: usize, path: &mut Vec<Location>) {
        let mut ci = end_idx;
        path.push(self.point(ci));
        while ci != start_idx {
            ci = self.nodes[ci].parent;
            path.push(self.point(ci));
        }
        path.reverse();
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn idx(&self, p: Location) -> Option<usize> {
        if p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    #[inline]
    fn point(&self, idx: usize) -> Location {
        let w = self.width as usize;
        Location::new((idx % w) as i32, (idx / w) as i32)
    }
}
