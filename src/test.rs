#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::{
        arena::Arena,
        board::Board,
        bot::Bot,
        config::{BoardConfig, BotSpec, GameConfig},
        error::GameError,
        evaluator::{check_win, check_win_full, is_draw, outcome_after_move, Outcome},
        game::{Game, GameState},
        heuristic,
        minimax::MinimaxBot,
        movegen::{legal_moves, move_order},
        random_bot::RandomBot,
        score::ScoreVector,
        transposition_table::TranspositionTable,
    };

    fn classic() -> BoardConfig {
        BoardConfig::default()
    }

    fn config(width: usize, height: usize, win_length: usize, player_count: usize) -> BoardConfig {
        BoardConfig {
            width,
            height,
            win_length,
            player_count,
        }
    }

    // plays random moves until the game ends, checking the incremental and full scans agree
    fn random_game(config: BoardConfig, seed: u64) -> Result<Board> {
        let mut board = Board::new(config)?;
        let mut bot = RandomBot::with_seed(seed);
        while !board.is_full() {
            let column = bot.choose_move(&board)?;
            let row = board.drop(column)?;
            let winner = check_win(&board, row, column);
            assert_eq!(winner, check_win_full(&board));
            if winner.is_some() {
                break;
            }
        }
        Ok(board)
    }

    #[test]
    pub fn drop_lands_on_lowest_row() -> Result<()> {
        let mut board = Board::new(classic())?;
        assert_eq!(board.drop(3)?, 0);
        assert_eq!(board.drop(3)?, 1);
        assert_eq!(board.get(3, 0), Some(0));
        assert_eq!(board.get(3, 1), Some(1));
        assert_eq!(board.get(3, 2), None);
        assert_eq!(board.height_of(3), 2);
        assert_eq!(board.last_move(), Some((3, 1)));
        Ok(())
    }

    #[test]
    pub fn seventh_drop_into_full_column() -> Result<()> {
        let mut board = Board::new(classic())?;
        for _ in 0..6 {
            board.drop(3)?;
        }
        assert!(!board.playable(3));
        assert_eq!(board.drop(3), Err(GameError::ColumnFull(3)));
        // a failed drop changes nothing
        assert_eq!(board.num_moves(), 6);
        assert_eq!(board.active_player(), 0);
        Ok(())
    }

    #[test]
    pub fn drop_out_of_range() -> Result<()> {
        let mut board = Board::new(classic())?;
        assert_eq!(
            board.drop(7),
            Err(GameError::ColumnOutOfRange { column: 7, width: 7 })
        );
        Ok(())
    }

    #[test]
    pub fn occupied_cells_match_moves() -> Result<()> {
        for seed in 0..20 {
            let board = random_game(config(5, 4, 3, 3), seed)?;
            let occupied = board.cells().iter().filter(|&&cell| cell != 0).count();
            assert_eq!(occupied, board.num_moves());
            assert_eq!(board.moves().len(), board.num_moves());
        }
        Ok(())
    }

    #[test]
    pub fn undo_restores_board() -> Result<()> {
        let mut board = Board::from_moves(classic(), &[3, 3, 2, 4, 0])?;
        for column in 0..7 {
            let before = board.clone();
            board.drop(column)?;
            assert_ne!(board, before);
            board.undo(column)?;
            assert_eq!(board, before);
        }
        Ok(())
    }

    #[test]
    pub fn play_and_unplay_round_trip() -> Result<()> {
        let mut board = Board::from_moves(classic(), &[3, 3])?;
        let before = board.clone();
        assert_eq!(board.play(3), 2);
        assert_eq!(board.get(3, 2), Some(0));
        board.unplay();
        assert_eq!(board, before);

        // nothing to take back
        let mut empty = Board::new(classic())?;
        empty.unplay();
        assert_eq!(empty, Board::new(classic())?);
        Ok(())
    }

    #[test]
    pub fn undo_rejects_moves_not_made() -> Result<()> {
        let mut board = Board::from_moves(classic(), &[3, 4])?;
        assert_eq!(board.undo(0), Err(GameError::EmptyColumn(0)));
        assert_eq!(board.undo(3), Err(GameError::NotLastMove(3)));
        board.undo(4)?;
        board.undo(3)?;
        assert_eq!(board, Board::new(classic())?);
        Ok(())
    }

    #[test]
    pub fn players_rotate() -> Result<()> {
        let mut board = Board::new(config(7, 6, 4, 3))?;
        let mut seen = vec![];
        for column in 0..6 {
            seen.push(board.active_player());
            board.drop(column)?;
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2]);
        board.undo(5)?;
        assert_eq!(board.active_player(), 2);
        Ok(())
    }

    #[test]
    pub fn from_moves_stops_at_win() -> Result<()> {
        assert_eq!(
            Board::from_moves(classic(), &[0, 1, 0, 1, 0, 1, 0, 1]),
            Err(GameError::GameOver)
        );
        Ok(())
    }

    #[test]
    pub fn board_display() -> Result<()> {
        let board = Board::from_moves(config(3, 2, 3, 2), &[1, 1, 0])?;
        assert_eq!(board.to_string(), ".1.\n00.\n");
        Ok(())
    }

    #[test]
    pub fn invalid_configurations() {
        for (width, height, win_length, players) in
            [(0, 6, 4, 2), (7, 0, 4, 2), (7, 6, 1, 2), (7, 6, 4, 1), (7, 6, 4, 9), (65, 6, 4, 2)].iter()
        {
            let result = BoardConfig::new(*width, *height, *win_length, *players);
            assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
            let result = Game::new(GameConfig::new(config(*width, *height, *win_length, *players)));
            assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
        }

        let bot_for_missing_player = GameConfig::new(classic()).with_bot(2, BotSpec::Random { seed: None });
        assert!(matches!(
            Game::new(bot_for_missing_player),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    pub fn player_cap_is_an_engine_limit() {
        match BoardConfig::new(7, 6, 4, 9) {
            Err(GameError::InvalidConfiguration(message)) => {
                assert!(message.contains("engine supports at most 8 players"), "{}", message)
            }
            other => panic!("expected a configuration error, got {:?}", other),
        }
        assert!(BoardConfig::new(7, 6, 4, 8).is_ok());
    }

    #[test]
    pub fn vertical_win_on_fourth_drop() -> Result<()> {
        let mut game = Game::new(GameConfig::new(classic()))?;
        for _ in 0..3 {
            assert_eq!(game.apply_move(0)?, GameState::Playing { next_player: 1 });
            assert_eq!(game.apply_move(1)?, GameState::Playing { next_player: 0 });
        }
        assert_eq!(game.apply_move(0)?, GameState::Won(0));
        assert_eq!(game.apply_move(2), Err(GameError::GameOver));
        Ok(())
    }

    #[test]
    pub fn horizontal_and_diagonal_wins() -> Result<()> {
        // bottom row 0..=3
        let board = Board::from_moves(classic(), &[0, 0, 1, 1, 2, 2, 3])?;
        assert_eq!(check_win(&board, 0, 3), Some(0));
        // the middle of the line counts too
        assert_eq!(check_win(&board, 0, 1), Some(0));

        // diagonal /
        let board = Board::from_moves(classic(), &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3])?;
        assert_eq!(check_win(&board, 3, 3), Some(0));
        assert_eq!(check_win_full(&board), Some(0));

        // diagonal \
        let board = Board::from_moves(classic(), &[6, 5, 5, 4, 4, 3, 4, 3, 3, 0, 3])?;
        assert_eq!(check_win(&board, 3, 3), Some(0));
        assert_eq!(check_win_full(&board), Some(0));
        Ok(())
    }

    #[test]
    pub fn no_win_with_three() -> Result<()> {
        let board = Board::from_moves(classic(), &[0, 0, 1, 1, 2])?;
        assert_eq!(check_win(&board, 0, 2), None);
        assert_eq!(check_win_full(&board), None);
        // empty cells never win
        assert_eq!(check_win(&board, 5, 5), None);
        Ok(())
    }

    #[test]
    pub fn incremental_matches_full_scan() -> Result<()> {
        for seed in 0..50 {
            random_game(classic(), seed)?;
            random_game(config(5, 5, 3, 3), seed)?;
            random_game(config(9, 3, 5, 4), seed)?;
        }
        Ok(())
    }

    #[test]
    pub fn three_player_win() -> Result<()> {
        let mut game = Game::new(GameConfig::new(config(7, 6, 3, 3)))?;
        let moves = [0, 1, 6, 0, 1, 6, 2, 3];
        for &column in moves.iter() {
            assert!(!game.apply_move(column)?.is_over());
        }
        assert_eq!(game.apply_move(6)?, GameState::Won(2));
        Ok(())
    }

    #[test]
    pub fn full_scan_tie_break() -> Result<()> {
        // win length 2 lets play continue on a board where both players have a line
        let mut board = Board::new(config(4, 2, 2, 2))?;
        for &column in [2, 0, 3, 1].iter() {
            board.drop(column)?;
        }
        // player 0 completed a line first, but player 1's line starts at the first cell scanned
        assert_eq!(check_win(&board, 0, 3), Some(0));
        assert_eq!(check_win(&board, 0, 1), Some(1));
        assert_eq!(check_win_full(&board), Some(1));
        Ok(())
    }

    #[test]
    pub fn draw_on_full_board() -> Result<()> {
        let mut game = Game::new(GameConfig::new(config(3, 2, 3, 2)))?;
        let moves = [0, 1, 2, 0, 1];
        for &column in moves.iter() {
            assert!(!game.apply_move(column)?.is_over());
        }
        assert_eq!(game.apply_move(2)?, GameState::Draw);
        assert!(is_draw(game.board()));

        // a full board holding a line is not a draw
        let mut board = Board::new(config(2, 2, 2, 2))?;
        for &column in [0, 1, 1, 0].iter() {
            board.drop(column)?;
        }
        assert!(board.is_full());
        assert!(!is_draw(&board));
        Ok(())
    }

    #[test]
    pub fn unwinnable_configuration() -> Result<()> {
        let board_config = config(3, 3, 5, 2);
        assert!(!board_config.is_winnable());

        let mut board = Board::new(board_config)?;
        let mut last = None;
        for column in [0, 0, 0, 1, 1, 1, 2, 2, 2].iter() {
            let row = board.drop(*column)?;
            last = outcome_after_move(&board, row, *column);
        }
        assert_eq!(last, Some(Outcome::Draw));
        assert_eq!(check_win_full(&board), None);
        assert!(is_draw(&board));
        assert_eq!(heuristic::evaluate(&board), ScoreVector::neutral(2));

        let mut bot = MinimaxBot::new(3);
        let board = Board::from_moves(board_config, &[1, 1])?;
        assert!(board.playable(bot.choose_move(&board)?));
        Ok(())
    }

    #[test]
    pub fn center_out_order() -> Result<()> {
        assert_eq!(move_order(7), vec![3, 2, 4, 1, 5, 0, 6]);
        assert_eq!(move_order(6), vec![2, 3, 1, 4, 0, 5]);
        assert_eq!(move_order(1), vec![0]);

        let board = Board::from_moves(config(5, 2, 2, 3), &[2, 2, 0])?;
        let moves: Vec<usize> = legal_moves(&board).collect();
        assert_eq!(moves, vec![1, 3, 0, 4]);
        // deriving the sequence again gives the same answer
        assert_eq!(legal_moves(&board).collect::<Vec<_>>(), moves);

        let full = Board::from_moves(config(2, 1, 2, 3), &[0, 1])?;
        assert_eq!(legal_moves(&full).count(), 0);
        Ok(())
    }

    #[test]
    pub fn random_bot_avoids_full_columns() -> Result<()> {
        let mut board = Board::new(classic())?;
        for _ in 0..6 {
            board.drop(3)?;
        }
        for _ in 0..6 {
            board.drop(0)?;
        }
        let mut bot = RandomBot::with_seed(7);
        for _ in 0..500 {
            let column = bot.choose_move(&board)?;
            assert!(board.playable(column), "column {} is full", column);
        }
        Ok(())
    }

    #[test]
    pub fn random_bot_is_reproducible() -> Result<()> {
        let board = Board::new(classic())?;
        let mut first = RandomBot::with_seed(42);
        let mut second = RandomBot::with_seed(42);
        for _ in 0..50 {
            assert_eq!(first.choose_move(&board)?, second.choose_move(&board)?);
        }
        Ok(())
    }

    #[test]
    pub fn bots_refuse_full_board() -> Result<()> {
        let board = Board::from_moves(config(2, 2, 3, 2), &[0, 1, 1, 0])?;
        assert_eq!(RandomBot::new().choose_move(&board), Err(GameError::NoLegalMove));
        assert_eq!(MinimaxBot::new(4).choose_move(&board), Err(GameError::NoLegalMove));
        Ok(())
    }

    #[test]
    pub fn minimax_takes_win() -> Result<()> {
        let board = Board::from_moves(classic(), &[0, 0, 1, 1, 2, 2])?;
        let mut bot = MinimaxBot::new(2);
        assert_eq!(bot.choose_move(&board)?, 3);
        assert!(bot.evaluate(&board, 2)?.is_win_for(0));
        Ok(())
    }

    #[test]
    pub fn minimax_blocks_loss() -> Result<()> {
        let board = Board::from_moves(classic(), &[0, 6, 1, 6, 2])?;
        let mut bot = MinimaxBot::new(2);
        assert_eq!(bot.choose_move(&board)?, 3);
        Ok(())
    }

    #[test]
    pub fn minimax_prefers_quicker_win() -> Result<()> {
        // player 0 can win now in column 3, or later by building elsewhere
        let board = Board::from_moves(classic(), &[0, 6, 1, 6, 2, 5])?;
        let mut bot = MinimaxBot::new(4);
        assert_eq!(bot.choose_move(&board)?, 3);
        let quick = bot.evaluate(&board, 4)?.get(0);
        let slow = bot.evaluate(&board, 2)?.get(0);
        // both see the immediate win, the deeper search values it with more depth remaining
        assert!(quick > slow);
        Ok(())
    }

    #[test]
    pub fn minimax_leaves_board_untouched() -> Result<()> {
        let board = Board::from_moves(classic(), &[3, 3, 2, 4])?;
        let before = board.clone();
        let mut bot = MinimaxBot::new(5);
        bot.choose_move(&board)?;
        assert_eq!(board, before);

        let board = Board::from_moves(config(6, 5, 3, 3), &[2, 3, 1])?;
        let before = board.clone();
        bot.choose_move(&board)?;
        assert_eq!(board, before);
        Ok(())
    }

    #[test]
    pub fn minimax_depth_zero() -> Result<()> {
        let board = Board::from_moves(classic(), &[3])?;
        let mut bot = MinimaxBot::new(0);
        let column = bot.choose_move(&board)?;
        assert!(board.playable(column));
        // every root move is scored directly
        assert_eq!(bot.stats().nodes, 8);
        Ok(())
    }

    #[test]
    pub fn minimax_never_loses_small_board() -> Result<()> {
        let board = config(4, 4, 3, 2);

        for seed in 0..4 {
            let config = GameConfig::new(board)
                .with_bot(0, BotSpec::Minimax { depth: 16, node_budget: None })
                .with_bot(1, BotSpec::Random { seed: Some(seed) });
            let mut game = Game::new(config)?;
            while !game.state().is_over() {
                let column = game.request_bot_move()?.expect("both players are bots");
                game.apply_move(column)?;
            }
            assert_ne!(game.state(), GameState::Won(1));
        }

        let config = GameConfig::new(board)
            .with_bot(0, BotSpec::Minimax { depth: 16, node_budget: None })
            .with_bot(1, BotSpec::Minimax { depth: 16, node_budget: None });
        let mut game = Game::new(config)?;
        while !game.state().is_over() {
            let column = game.request_bot_move()?.expect("both players are bots");
            game.apply_move(column)?;
        }
        assert_ne!(game.state(), GameState::Won(1));
        Ok(())
    }

    #[test]
    pub fn cache_is_order_independent() -> Result<()> {
        let first = Board::from_moves(classic(), &[0, 1, 2, 3])?;
        let second = Board::from_moves(classic(), &[2, 3, 0, 1])?;
        assert_eq!(first.cells(), second.cells());

        let mut warm = MinimaxBot::new(5);
        let a = warm.evaluate(&first, 5)?;
        let b = warm.evaluate(&second, 5)?;
        assert!(warm.stats().cache_hits > 0);
        let c = MinimaxBot::new(5).evaluate(&second, 5)?;
        let d = MinimaxBot::new(5)
            .with_transposition_table(TranspositionTable::with_max_entries(1))
            .evaluate(&first, 5)?;
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);

        // three players, no mirroring or bounds involved
        let first = Board::from_moves(config(5, 4, 3, 3), &[0, 1, 4, 3])?;
        let second = Board::from_moves(config(5, 4, 3, 3), &[3, 1, 4, 0])?;
        assert_eq!(first.cells(), second.cells());
        let mut warm = MinimaxBot::new(4);
        let a = warm.evaluate(&first, 4)?;
        let b = warm.evaluate(&second, 4)?;
        let c = MinimaxBot::new(4).evaluate(&second, 4)?;
        assert_eq!(a, b);
        assert_eq!(a, c);
        Ok(())
    }

    #[test]
    pub fn mirrored_positions_score_alike() -> Result<()> {
        let left = Board::from_moves(classic(), &[0, 1, 1])?;
        let right = Board::from_moves(classic(), &[6, 5, 5])?;
        let mut bot = MinimaxBot::new(4);
        let a = bot.evaluate(&left, 4)?;
        let b = MinimaxBot::new(4).evaluate(&right, 4)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    pub fn cache_is_per_game() -> Result<()> {
        let mut bot = MinimaxBot::new(3);
        bot.choose_move(&Board::from_moves(classic(), &[3])?)?;
        assert!(!bot.transposition_table().is_empty());

        bot.reset();
        assert!(bot.transposition_table().is_empty());

        // a different configuration starts from an empty table
        bot.choose_move(&Board::new(classic())?)?;
        let small = Board::new(config(3, 3, 3, 2))?;
        bot.choose_move(&small)?;
        let mut fresh = MinimaxBot::new(3);
        fresh.choose_move(&small)?;
        assert_eq!(bot.transposition_table().len(), fresh.transposition_table().len());
        Ok(())
    }

    #[test]
    pub fn three_player_minimax() -> Result<()> {
        let three = config(7, 6, 3, 3);

        // player 0 wins on the spot in column 0, even though others have threats
        let board = Board::from_moves(three, &[0, 6, 3, 0, 6, 4])?;
        let mut bot = MinimaxBot::new(3);
        assert_eq!(bot.choose_move(&board)?, 0);
        let scores = bot.evaluate(&board, 3)?;
        assert!(scores.is_win_for(0));
        assert!(scores.is_loss_for(1) && scores.is_loss_for(2));
        Ok(())
    }

    #[test]
    pub fn three_player_minimax_blocks_next_player() -> Result<()> {
        let three = config(7, 6, 3, 3);

        // player 1 has two stacked in column 6, player 0 has no win of its own
        let board = Board::from_moves(three, &[0, 6, 2, 4, 6, 0])?;
        assert_eq!(board.active_player(), 0);
        for depth in 1..=3 {
            let mut bot = MinimaxBot::new(depth);
            assert_eq!(bot.choose_move(&board)?, 6);
            assert!(!bot.evaluate(&board, depth)?.is_loss_for(0));
        }

        // any other move hands player 1 the game
        let mut bot = MinimaxBot::new(1);
        let mut elsewhere = board.clone();
        elsewhere.drop(3)?;
        assert!(bot.evaluate(&elsewhere, 0)?.is_win_for(1));
        Ok(())
    }

    #[test]
    pub fn unbounded_depth_does_not_overflow() -> Result<()> {
        let board = Board::new(config(4, 4, 3, 2))?;
        let mut bot = MinimaxBot::new(usize::MAX);
        let column = bot.choose_move(&board)?;
        assert!(board.playable(column));
        assert_eq!(bot.stats().depth_reached, usize::MAX);
        Ok(())
    }

    #[test]
    pub fn node_budget_falls_back() -> Result<()> {
        let board = Board::new(classic())?;

        let mut bot = MinimaxBot::new(8).with_node_budget(50);
        let column = bot.choose_move(&board)?;
        assert!(board.playable(column));
        assert!(bot.stats().depth_reached < 8);

        // not even the root fits, so the most central column is played
        let mut bot = MinimaxBot::new(8).with_node_budget(0);
        assert_eq!(bot.choose_move(&board)?, 3);

        // a generous budget reaches full depth and agrees with the unbounded search
        let board = Board::from_moves(classic(), &[3, 3, 4])?;
        let mut bounded = MinimaxBot::new(3).with_node_budget(1_000_000);
        let mut unbounded = MinimaxBot::new(3);
        assert_eq!(bounded.choose_move(&board)?, unbounded.choose_move(&board)?);
        assert_eq!(bounded.stats().depth_reached, 3);
        Ok(())
    }

    #[test]
    pub fn heuristic_rewards_progress() -> Result<()> {
        let empty = Board::new(classic())?;
        assert_eq!(heuristic::evaluate(&empty), ScoreVector::neutral(2));

        let one = Board::from_moves(classic(), &[3])?;
        let scores = heuristic::evaluate(&one);
        assert!(scores.get(0) > 0);
        assert_eq!(scores.get(0), -scores.get(1));

        let two = Board::from_moves(classic(), &[3, 6, 2])?;
        assert!(heuristic::potentials(&two)[0] > heuristic::potentials(&one)[0]);

        let three = Board::from_moves(config(7, 6, 4, 3), &[3, 0, 6])?;
        let scores = heuristic::evaluate(&three);
        assert_eq!(scores.as_slice().len(), 3);
        assert!(scores.get(0) > scores.get(1));
        Ok(())
    }

    #[test]
    pub fn game_bot_requests() -> Result<()> {
        let config = GameConfig::new(classic()).with_bot(1, BotSpec::Minimax { depth: 3, node_budget: None });
        let mut game = Game::new(config)?;
        assert!(!game.is_bot(0));
        assert!(game.is_bot(1));
        assert_eq!(game.bot_name(1), Some("Minimax"));

        // human to move
        assert_eq!(game.request_bot_move()?, None);
        game.apply_move(3)?;

        let before = game.board().clone();
        let column = game.request_bot_move()?.expect("player 1 is a bot");
        assert_eq!(game.board(), &before);
        game.apply_move(column)?;
        assert_eq!(game.board().num_moves(), 2);

        game.set_bot(0, Some(Box::new(RandomBot::with_seed(3))))?;
        assert!(game.request_bot_move()?.is_some());
        assert!(game.set_bot(2, None).is_err());

        game.reset()?;
        assert_eq!(game.board().num_moves(), 0);
        assert_eq!(game.state(), GameState::Playing { next_player: 0 });
        Ok(())
    }

    #[test]
    pub fn game_over_requests() -> Result<()> {
        let config = GameConfig::new(classic()).with_bot(0, BotSpec::Random { seed: Some(1) });
        let mut game = Game::new(config)?;
        for &column in [0, 1, 0, 1, 0, 1, 0].iter() {
            game.apply_move(column)?;
        }
        assert_eq!(game.state(), GameState::Won(0));
        assert_eq!(game.request_bot_move(), Err(GameError::NoLegalMove));
        Ok(())
    }

    #[test]
    pub fn arena_tally() -> Result<()> {
        let arena = Arena::new(
            classic(),
            vec![
                BotSpec::Minimax { depth: 4, node_budget: None },
                BotSpec::Random { seed: None },
            ],
            10,
        );
        let tally = arena.run(|| {})?;
        assert_eq!(tally.games, 10);
        assert_eq!(tally.wins.iter().sum::<u64>() + tally.draws, 10);
        assert!(tally.wins[0] > tally.wins[1]);

        // unseeded random bots get a different seed every game
        assert_ne!(arena.game_config(0).bots[1], arena.game_config(2).bots[1]);
        Ok(())
    }

    #[test]
    pub fn arena_needs_a_bot_per_player() {
        let arena = Arena::new(classic(), vec![BotSpec::Random { seed: None }], 1);
        assert!(matches!(arena.run(|| {}), Err(GameError::InvalidConfiguration(_))));
    }
}
