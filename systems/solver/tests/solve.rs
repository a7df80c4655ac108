use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use telekinesis_core::{Cell, Direction};
use telekinesis_system_solver::{solve, Path, PathSolver};
use telekinesis_world::{Layout, Maze};

const OPEN_THREE_BY_THREE: &str = "\
#####
#..F#
#...#
#G..#
#####
";

#[test]
fn open_room_takes_two_slides_to_the_far_corner() {
    let layout = Layout::parse(OPEN_THREE_BY_THREE).expect("layout parses");
    let maze = layout.maze().expect("maze builds");
    let start = layout.guardian().expect("guardian marker");

    let path = solve(&maze, start).expect("enclosed maze");

    assert_eq!(path.directions(), &[Direction::North, Direction::East]);
    assert_eq!(
        path.waypoints(),
        &[Cell::new(1, 1), Cell::new(1, 3), Cell::new(3, 3)]
    );
}

#[test]
fn start_on_finish_needs_no_slides() {
    let layout = Layout::parse(OPEN_THREE_BY_THREE).expect("layout parses");
    let maze = layout.maze().expect("maze builds");

    let path = solve(&maze, maze.finish()).expect("enclosed maze");

    assert!(path.is_empty());
    assert_eq!(path.start(), maze.finish());
}

#[test]
fn walled_in_finish_is_unreachable() {
    let layout = Layout::parse(
        "\
#######
#..#..#
#.#F#.#
#..#..#
#G....#
#######
",
    )
    .expect("layout parses");
    let maze = layout.maze().expect("maze builds");
    let start = layout.guardian().expect("guardian marker");

    let path = solve(&maze, start).expect("enclosed maze");

    assert!(path.is_empty());
    assert_eq!(path.moves(), 0);
}

#[test]
fn detour_around_an_obstacle() {
    let layout = Layout::parse(
        "\
#####
#F..#
##..#
#G..#
#####
",
    )
    .expect("layout parses");
    let maze = layout.maze().expect("maze builds");
    let start = layout.guardian().expect("guardian marker");

    let path = solve(&maze, start).expect("enclosed maze");

    assert_eq!(
        path.directions(),
        &[Direction::East, Direction::North, Direction::West]
    );
    assert_valid(&maze, &path);
}

#[test]
fn solver_scratch_is_reset_between_solves() {
    let layout = Layout::parse(OPEN_THREE_BY_THREE).expect("layout parses");
    let maze = layout.maze().expect("maze builds");
    let mut solver = PathSolver::new();

    let first = solver.solve(&maze, Cell::new(1, 1)).expect("enclosed maze");
    let second = solver.solve(&maze, Cell::new(3, 1)).expect("enclosed maze");

    assert_eq!(first, solve(&maze, Cell::new(1, 1)).expect("enclosed maze"));
    assert_eq!(second, solve(&maze, Cell::new(3, 1)).expect("enclosed maze"));
    assert_eq!(second.directions(), &[Direction::North]);
}

#[test]
fn random_mazes_match_exhaustive_search() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x7e1e_c1e7);
    let mut reachable_cases = 0;

    for _ in 0..150 {
        let (maze, start) = random_maze(&mut rng, 5, 5);
        let path = solve(&maze, start).expect("enclosed maze");
        let reachable = reachable_cells(&maze, start);

        if !reachable.contains(&maze.finish()) || start == maze.finish() {
            assert!(path.is_empty(), "expected no slides from {start}");
            continue;
        }

        reachable_cases += 1;
        assert_valid(&maze, &path);

        let moves = path.moves();
        assert!(
            within(&maze, start, maze.finish(), moves),
            "solver path of {moves} slides is not achievable"
        );
        assert!(
            !within(&maze, start, maze.finish(), moves - 1),
            "a path shorter than {moves} slides exists from {start}"
        );
    }

    assert!(reachable_cases > 10, "only {reachable_cases} solvable cases");
}

fn assert_valid(maze: &Maze, path: &Path) {
    assert_eq!(path.end(), maze.finish());
    for (index, direction) in path.directions().iter().enumerate() {
        let from = path.waypoints()[index];
        let to = path.waypoints()[index + 1];
        assert_eq!(maze.step(from, *direction), Ok(to));
        assert_eq!(Direction::between(from, to), Some(*direction));
    }
}

fn random_maze(rng: &mut ChaCha8Rng, width: usize, height: usize) -> (Maze, Cell) {
    let mut rows = vec![vec!['#'; width + 2]; height + 2];
    let mut open = Vec::new();

    for (line, row) in rows.iter_mut().enumerate().skip(1).take(height) {
        for (column, tile) in row.iter_mut().enumerate().skip(1).take(width) {
            if rng.gen_bool(0.3) {
                continue;
            }
            *tile = '.';
            open.push((line, column));
        }
    }

    if open.is_empty() {
        rows[1][1] = '.';
        open.push((1, 1));
    }

    let (finish_line, finish_column) = open[rng.gen_range(0..open.len())];
    rows[finish_line][finish_column] = 'F';
    let (start_line, start_column) = open[rng.gen_range(0..open.len())];

    let text: Vec<String> = rows.iter().map(|row| row.iter().collect()).collect();
    let layout = Layout::parse(&text.join("\n")).expect("layout parses");
    let start = Cell::new(
        start_column as i32,
        (height + 1 - start_line) as i32,
    );

    (layout.maze().expect("maze builds"), start)
}

fn reachable_cells(maze: &Maze, start: Cell) -> HashSet<Cell> {
    let mut seen = HashSet::from([start]);
    let mut stack = vec![start];

    while let Some(cell) = stack.pop() {
        for direction in Direction::SEARCH_ORDER {
            let next = maze.step(cell, direction).expect("enclosed maze");
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }

    seen
}

fn within(maze: &Maze, from: Cell, finish: Cell, slides: usize) -> bool {
    within_memo(maze, from, finish, slides, &mut HashMap::new())
}

fn within_memo(
    maze: &Maze,
    from: Cell,
    finish: Cell,
    slides: usize,
    memo: &mut HashMap<(Cell, usize), bool>,
) -> bool {
    if from == finish {
        return true;
    }
    if slides == 0 {
        return false;
    }
    if let Some(&known) = memo.get(&(from, slides)) {
        return known;
    }

    let found = Direction::SEARCH_ORDER.iter().any(|&direction| {
        let next = maze.step(from, direction).expect("enclosed maze");
        next != from && within_memo(maze, next, finish, slides - 1, memo)
    });
    let _ = memo.insert((from, slides), found);
    found
}
