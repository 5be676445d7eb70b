//! Behavioural properties of the token engine

use proptest::prelude::*;
use study_calc::config::{CalculatorConfig, DEFAULT_ERROR_MARKER};
use study_calc::core::number::{format_number, round_to};
use study_calc::core::{
    calculate, Calculator, Constant, DivisionByZero, MemoryAction, Operation, ScientificFunction,
    Token,
};

fn after(labels: &str) -> Calculator {
    let mut calc = Calculator::new();
    for label in labels.split_whitespace() {
        calc.handle(label.parse().unwrap());
    }
    calc
}

fn token_strategy() -> impl Strategy<Value = Token> {
    prop_oneof![
        (0u8..=9).prop_map(Token::Digit),
        Just(Token::Point),
        prop::sample::select(Operation::ALL.to_vec()).prop_map(Token::Operator),
        prop::sample::select(ScientificFunction::ALL.to_vec()).prop_map(Token::Function),
        prop_oneof![Just(Constant::Pi), Just(Constant::E)].prop_map(Token::Constant),
        prop_oneof![
            Just(MemoryAction::Add),
            Just(MemoryAction::Recall),
            Just(MemoryAction::Clear)
        ]
        .prop_map(Token::Memory),
        Just(Token::OpenParen),
        Just(Token::Clear),
        Just(Token::Delete),
        Just(Token::Equals),
    ]
}

fn operand_strategy() -> impl Strategy<Value = u32> {
    1u32..1000
}

fn digits(n: u32) -> String {
    n.to_string()
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

// ===== Worked examples =====

#[test]
fn digits_concatenate_literally() {
    assert_eq!(after("1 2 . 5").display(), "12.5");
    assert_eq!(after("0 0 1").display(), "1");
    assert_eq!(after(". 5").display(), "0.5");
}

#[test]
fn three_plus_four_equals_seven() {
    let calc = after("3 + 4 =");
    assert_eq!(calc.display(), "7");
    assert!(calc.trace().is_empty());
    assert_eq!(calc.pending_operator(), None);
}

#[test]
fn evaluation_is_left_to_right() {
    assert_eq!(after("3 + 4 × 2 =").display(), "14");
    assert_eq!(after("2 + 3 × 4 − 5 =").display(), "15");
}

#[test]
fn square_root() {
    assert_eq!(after("1 6 √").display(), "4");
    assert_eq!(after("0 − 4 = √").display(), DEFAULT_ERROR_MARKER);
}

#[test]
fn division_by_zero_policies() {
    assert_eq!(after("5 ÷ 0 =").display(), "0");

    let config = CalculatorConfig::default().with_division_by_zero(DivisionByZero::Error);
    let mut calc = Calculator::with_config(config);
    for label in ["5", "÷", "0", "="] {
        calc.handle(label.parse().unwrap());
    }
    assert!(calc.is_error());
}

#[test]
fn clear_resets_everything_but_memory() {
    let mut calc = after("7 M+ C 3 + 4");
    calc.handle(Token::Clear);
    assert_eq!(calc.display(), "0");
    assert!(calc.trace().is_empty());
    assert_eq!(calc.pending_operator(), None);
    assert!(!calc.is_reset_pending());
    assert_eq!(calc.memory(), 7.0);
}

#[test]
fn point_one_plus_point_two() {
    assert_eq!(after("0 . 1 + 0 . 2 =").display(), "0.3");
}

#[test]
fn operator_after_function_or_constant_replaces() {
    let mut calc = after("3 + 1 6 √ ×");
    assert_eq!(calc.display(), "4");
    assert_eq!(calc.trace().render(), "3 × ");
    calc.handle_all(["2", "="].map(|label| label.parse::<Token>().unwrap()));
    assert_eq!(calc.display(), "6");

    assert_eq!(after("3 + π ×").trace().render(), "3 × ");
    assert_eq!(after("8 M+ C 3 + MR ÷").trace().render(), "3 ÷ ");
}

#[test]
fn equals_after_function_uses_its_result() {
    let calc = after("2 + 9 √ =");
    assert_eq!(calc.display(), "5");
    assert_eq!(calc.expression_text(), "2 + 3 = 5");
}

#[test]
fn repeated_operator_replaces() {
    let calc = after("6 + × −");
    assert_eq!(calc.pending_operator(), Some(Operation::Subtract));
    assert_eq!(calc.trace().render(), "6 − ");
}

// ===== Properties =====

proptest! {
    #[test]
    fn prop_digit_entry_matches_number(n in 1u32..1_000_000) {
        let calc = after(&digits(n));
        prop_assert_eq!(calc.display(), n.to_string());
    }

    #[test]
    fn prop_display_never_empty(tokens in prop::collection::vec(token_strategy(), 0..40)) {
        let mut calc = Calculator::new();
        for token in tokens {
            calc.handle(token);
            prop_assert!(!calc.display().is_empty());
        }
    }

    #[test]
    fn prop_at_most_one_point_per_operand(tokens in prop::collection::vec(
        prop_oneof![(0u8..=9).prop_map(Token::Digit), Just(Token::Point)], 1..20)
    ) {
        let mut calc = Calculator::new();
        calc.handle_all(tokens);
        prop_assert!(calc.display().matches('.').count() <= 1);
    }

    #[test]
    fn prop_clear_restores_idle(tokens in prop::collection::vec(token_strategy(), 0..40)) {
        let mut calc = Calculator::new();
        calc.handle_all(tokens);
        let memory = calc.memory();
        calc.handle(Token::Clear);
        prop_assert_eq!(calc.display(), "0");
        prop_assert!(calc.trace().is_empty());
        prop_assert_eq!(calc.pending_operator(), None);
        prop_assert!(!calc.is_reset_pending());
        prop_assert!(calc.history().is_empty());
        prop_assert_eq!(calc.memory().to_bits(), memory.to_bits());
    }

    #[test]
    fn prop_chain_matches_sequential_evaluation(
        a in operand_strategy(),
        b in operand_strategy(),
        c in operand_strategy(),
        op1 in prop::sample::select(Operation::ALL.to_vec()),
        op2 in prop::sample::select(Operation::ALL.to_vec()),
    ) {
        let labels = format!(
            "{} {} {} {} {} =",
            digits(a), op1.display_symbol(), digits(b), op2.display_symbol(), digits(c)
        );
        let calc = after(&labels);

        let step = |x: f64, y: f64, op| {
            round_to(calculate(x, y, op, DivisionByZero::Zero).unwrap(), 7)
        };
        let expected = step(step(f64::from(a), f64::from(b), op1), f64::from(c), op2);
        prop_assert_eq!(calc.display(), format_number(expected));
        prop_assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn prop_delete_never_leaves_empty_or_sign(n in 1u32..100_000, presses in 1usize..10) {
        let mut calc = after(&format!("0 − {} =", digits(n)));
        for _ in 0..presses {
            calc.handle(Token::Delete);
            prop_assert!(!calc.display().is_empty());
            prop_assert_ne!(calc.display(), "-");
        }
    }

    #[test]
    fn prop_memory_accumulates(values in prop::collection::vec(1u32..1000, 1..6)) {
        let mut labels = String::new();
        for v in &values {
            labels.push_str(&format!("C {} M+ ", digits(*v)));
        }
        labels.push_str("MR");
        let calc = after(&labels);
        let total: u32 = values.iter().sum();
        prop_assert_eq!(calc.display(), total.to_string());
    }
}
