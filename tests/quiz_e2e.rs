//! Trivia and stats-challenge sessions end to end

use cube_guesser::core::{Card, CardRepository, Color};
use cube_guesser::game::{GameEngine, GameMode, InvalidAction, Outcome, Phase, Transition};
use cube_guesser::persist::MemoryStore;
use cube_guesser::GameConfig;
use similar_asserts::assert_eq;
use std::sync::Arc;

fn cube() -> Arc<CardRepository> {
    let colors = [Color::White, Color::Blue, Color::Black, Color::Red, Color::Green];
    let cards = (0..45u32).map(|i| {
        let mut card = Card::new(format!("Test Card {i}"));
        card.colors.push(colors[i as usize % 5]);
        if i % 9 == 0 {
            card.colors.push(Color::Green);
        }
        card.mana_value = i % 7;
        card.type_line = match i % 4 {
            0 => "Creature — Human",
            1 => "Instant",
            2 => "Sorcery",
            _ => "Artifact Creature — Golem",
        }
        .to_string();
        card.oracle_text = if i % 3 == 0 { "Flying, haste" } else { "Draw a card." }.to_string();
        card.set_name = format!("Expansion {}", i % 8);
        card
    });
    Arc::new(CardRepository::from_cards(cards))
}

fn engine(seed: u64) -> GameEngine {
    GameEngine::new(
        cube(),
        GameConfig::default().with_seed(seed),
        Box::new(MemoryStore::new()),
    )
    .unwrap()
}

fn wrong_option(engine: &GameEngine) -> usize {
    let question = &engine.session().quiz_round().unwrap().question;
    question
        .options
        .iter()
        .position(|v| *v != question.correct_answer)
        .unwrap()
}

fn right_option(engine: &GameEngine) -> usize {
    let question = &engine.session().quiz_round().unwrap().question;
    question
        .options
        .iter()
        .position(|v| *v == question.correct_answer)
        .unwrap()
}

#[test]
fn test_trivia_six_of_ten() {
    let mut e = engine(17);
    e.start_mode(GameMode::Trivia).unwrap();

    for question in 0..10 {
        let view = e.view();
        assert_eq!(view.round, question + 1);
        assert_eq!(view.rounds_total, Some(10));
        let shown = view.question.unwrap();
        assert_eq!(shown.options.len(), 4);
        assert_eq!(shown.correct_answer, None);

        let index = if question < 6 { right_option(&e) } else { wrong_option(&e) };
        e.answer_option(index).unwrap();
        assert_eq!(e.answer_option(index), Err(InvalidAction::RoundResolved));

        let transition = e.advance_round().unwrap();
        if question < 9 {
            assert_eq!(transition, Transition::RoundStarted { round: question + 2 });
        } else {
            assert_eq!(
                transition,
                Transition::SessionComplete {
                    score: 60,
                    new_high_score: true
                }
            );
        }
    }

    let view = e.view();
    assert_eq!(view.phase, Phase::SessionComplete);
    assert_eq!(view.score, 60);
    assert_eq!(view.summary.as_deref(), Some("6 / 10 questions correct"));
    assert_eq!(e.high_score(GameMode::Trivia), 60);

    // Quiz rounds do not count as guessing rounds
    assert_eq!(e.play_stats().games_played, 0);
}

#[test]
fn test_quiz_answers_match_aggregates() {
    let mut e = engine(5);
    e.start_mode(GameMode::Trivia).unwrap();
    let stats = e.cube_stats();
    assert_eq!(stats.total, 45);

    for _ in 0..10 {
        let question = e.session().quiz_round().unwrap().question.clone();
        assert_eq!(question.correct_answer, stats.count(&question.fact));
        let mut options = question.options.clone();
        options.sort_unstable();
        options.dedup();
        assert_eq!(options.len(), 4);

        match e.answer_question(question.correct_answer) {
            Ok(Transition::Answered { correct, points, .. }) => {
                assert!(correct);
                assert_eq!(points, 10);
            }
            other => panic!("unexpected {other:?}"),
        }
        e.advance_round().unwrap();
    }
    assert_eq!(e.session().score, 100);
}

#[test]
fn test_stats_challenge_runs_until_clock_expires() {
    let mut e = engine(23);
    e.start_mode(GameMode::StatsChallenge).unwrap();
    assert_eq!(e.view().rounds_total, None);
    assert_eq!(e.session().time_remaining(), Some(90));

    let mut answered = 0;
    let mut correct = 0;
    loop {
        let token = e.active_timer().unwrap();
        for _ in 0..7 {
            match e.tick(token) {
                Ok(Transition::Ticked { .. }) => {}
                Ok(Transition::TimeExpired) => break,
                other => panic!("unexpected {other:?}"),
            }
        }
        if e.session().phase == Phase::RoundResolved {
            // The clock ran out mid-question
            assert_eq!(e.session().outcome, Outcome::Lost);
            break;
        }

        let index = if answered % 2 == 0 { right_option(&e) } else { wrong_option(&e) };
        if answered % 2 == 0 {
            correct += 1;
        }
        answered += 1;
        e.answer_option(index).unwrap();
        assert!(!e.view().final_round);
        e.advance_round().unwrap();
    }

    // 90 seconds at 7 per question: 12 answered, the 13th runs out and is not counted
    assert_eq!(answered, 12);
    assert!(e.view().final_round);
    assert_eq!(
        e.advance_round(),
        Ok(Transition::SessionComplete {
            score: correct * 10,
            new_high_score: true
        })
    );
    assert_eq!(e.view().summary.as_deref(), Some("6 / 12 questions correct"));
}

#[test]
fn test_seeded_quiz_is_reproducible() {
    let mut a = engine(99);
    let mut b = engine(99);
    a.start_mode(GameMode::Trivia).unwrap();
    b.start_mode(GameMode::Trivia).unwrap();
    for _ in 0..10 {
        assert_eq!(a.view(), b.view());
        a.answer_option(0).unwrap();
        b.answer_option(0).unwrap();
        a.advance_round().unwrap();
        b.advance_round().unwrap();
    }
    assert_eq!(a.view(), b.view());
}
