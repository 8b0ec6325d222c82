use toroid_snake::collision::{StepOutcome, classify};
use toroid_snake::config::GameConfig;
use toroid_snake::game::Game;
use toroid_snake::grid::{GridSize, Position, advance};
use toroid_snake::input::{Direction, InputBuffer};
use toroid_snake::snake::Snake;
use toroid_snake::speed::tick_interval_ms;

fn game(side: u16, base_speed_ms: u64, seed: u64) -> Game {
    Game::new_with_seed(
        GameConfig::new(side, base_speed_ms).expect("valid config"),
        seed,
    )
}

#[test]
fn straight_run_into_food_four_cells_ahead() {
    let mut game = game(10, 200, 42);
    {
        let state = game.state_mut();
        state.snake = Snake::new(Position { x: 5, y: 5 });
        state.input = InputBuffer::new(Direction::Right);
        state.food = Position { x: 9, y: 5 };
    }

    let outcomes: Vec<StepOutcome> = (0..4).map(|_| game.step()).collect();

    assert_eq!(
        outcomes,
        vec![
            StepOutcome::Advance,
            StepOutcome::Advance,
            StepOutcome::Advance,
            StepOutcome::Grow
        ]
    );
    let state = game.state();
    assert_eq!(state.snake.head(), Position { x: 9, y: 5 });
    assert_eq!(state.snake.len(), 2);
    assert_eq!(state.score, 1);
    assert!(!state.snake.occupies(state.food));
}

#[test]
fn wrapping_onto_the_vacating_tail_is_not_a_collision() {
    let grid = GridSize::new(10).expect("valid grid");
    let snake = Snake::from_segments(vec![Position { x: 0, y: 5 }, Position { x: 9, y: 5 }]);

    let head = advance(snake.head(), Direction::Left, grid);

    assert_eq!(head, Position { x: 9, y: 5 });
    assert_eq!(
        classify(head, &snake, Position { x: 4, y: 4 }),
        StepOutcome::Advance
    );
}

#[test]
fn reversal_intent_is_rejected_and_heading_kept() {
    let mut game = game(10, 200, 7);
    {
        let state = game.state_mut();
        state.snake = Snake::from_segments(vec![
            Position { x: 5, y: 5 },
            Position { x: 5, y: 6 },
            Position { x: 5, y: 7 },
        ]);
        state.input = InputBuffer::new(Direction::Up);
        state.food = Position { x: 0, y: 0 };
    }

    game.set_intent(Direction::Down);
    let outcome = game.step();

    assert_eq!(outcome, StepOutcome::Advance);
    assert_eq!(game.state().last_applied_direction(), Direction::Up);
    assert_eq!(game.state().snake.head(), Position { x: 5, y: 4 });
    assert_eq!(game.state().snake.len(), 3);
}

#[test]
fn ten_cells_at_two_hundred_ms_tick_every_160_ms() {
    assert_eq!(tick_interval_ms(200, 10), 160);
}

#[test]
fn growth_and_collision_invariants_hold_over_a_long_scripted_run() {
    let mut game = game(12, 100, 99);
    let grid = GridSize::new(12).expect("valid grid");
    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    for step in 0..2_000_usize {
        if step % 7 == 0 {
            game.set_intent(turns[(step / 7) % turns.len()]);
        }

        let before = game.state().clone();
        let outcome = game.step();
        let after = game.state();

        match outcome {
            StepOutcome::Grow if after.snake.len() > 1 => {
                assert_eq!(after.snake.len(), before.snake.len() + 1);
                assert_eq!(after.score as usize, after.snake.len() - 1);
                assert!(!after.snake.occupies(after.food));
                assert!(after.tick_interval_ms <= before.tick_interval_ms);
            }
            StepOutcome::Grow | StepOutcome::SelfCollision => {
                assert_eq!(after.snake.len(), 1);
                assert_eq!(after.score, 0);
                assert_eq!(after.tick_interval_ms, 100);
            }
            StepOutcome::Advance => {
                assert_eq!(after.snake.len(), before.snake.len());
                assert_ne!(
                    after.last_applied_direction(),
                    before.last_applied_direction().opposite()
                );
            }
        }

        assert!(after.snake.segments().all(|cell| cell.is_within(grid)));
        assert!(after.tick_interval_ms >= 60);
    }
}
