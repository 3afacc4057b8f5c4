//! End-to-end minimization scenarios

use qmc_logic::format::{ExpressionFormat, FormatProfile};
use qmc_logic::modify::{ExpressionModifier, NInputs};
use qmc_logic::qmc::{BruteForce, DefaultSelector, LargestFirst, QuineMcCluskey, SelectorKind};
use qmc_logic::{
    ContextFiller, ExprKind, Expression, GateForm, Minimizable, MinimizeError, MinimizerConfig,
    TruthTable,
};
use std::collections::HashMap;
use std::sync::Arc;

fn vars(names: &[&str]) -> Vec<Arc<str>> {
    names.iter().map(|n| Arc::from(*n)).collect()
}

fn term_count(expr: &Expression) -> usize {
    match expr.kind() {
        ExprKind::Or(ops) => ops.len(),
        ExprKind::Constant(false) => 0,
        _ => 1,
    }
}

#[test]
fn test_evaluate_xnor_rows() {
    let expr = Expression::parse("A*B + !A*!B").unwrap();
    let mut filler = ContextFiller::new(&expr).unwrap();
    assert_eq!(
        filler.evaluate_all(&expr).unwrap(),
        vec![true, false, false, true]
    );

    let mut assignment = HashMap::new();
    assignment.insert("A".to_string(), true);
    assignment.insert("B".to_string(), false);
    assert_eq!(expr.evaluate(&assignment), Ok(false));
}

#[test]
fn test_two_isolated_minterms() {
    let mut qmc = QuineMcCluskey::new(vars(&["A", "B"])).unwrap();
    qmc.add(0, false).unwrap();
    qmc.add(3, false).unwrap();
    qmc.reduce();

    let primes: Vec<String> = qmc.primes().iter().map(|p| p.to_string()).collect();
    assert_eq!(primes, vec!["00,0", "11,3"]);

    qmc.select(&mut BruteForce::new()).unwrap();
    assert_eq!(qmc.primes().len(), 2);
    assert_eq!(
        FormatProfile::JAVA.format(&qmc.to_expression()),
        "(!A && !B) || (A && B)"
    );
}

#[test]
fn test_and3_to_two_inputs() {
    let expr = Expression::parse("A*B*C").unwrap();
    let split = NInputs::new(2).unwrap().apply(&expr).unwrap();
    assert_eq!(split.max_fan_in(), 2);
    assert_eq!(split.depth(), 2);
    assert_eq!(split.equivalent_to(&expr), Ok(true));
}

#[test]
fn test_textbook_function() {
    // f(A,B,C,D) = sum m(4,8,10,11,12,15) + d(9,14)
    let mut table = TruthTable::new(["A", "B", "C", "D"]).unwrap();
    let mut values = [0u8; 16];
    for on in [4, 8, 10, 11, 12, 15] {
        values[on] = 1;
    }
    for dc in [9, 14] {
        values[dc] = 2;
    }
    table.add_values("F", &values).unwrap();

    let result = table.minimize().unwrap();
    assert_eq!(result.len(), 1);
    let f = &result[0].expression;
    assert_eq!(term_count(f), 3);

    let mut filler = ContextFiller::with_variables(table.variables().to_vec()).unwrap();
    let computed = filler.evaluate_all(f).unwrap();
    for (row, value) in values.iter().enumerate() {
        match value {
            0 => assert!(!computed[row], "row {}", row),
            1 => assert!(computed[row], "row {}", row),
            _ => {}
        }
    }
}

#[test]
fn test_expression_and_table_agree() {
    let expr = Expression::parse("a*!b*c + a*b*c + !a*b*!c + !a*b*c + a*b*!c").unwrap();
    let from_expr = expr.minimize().unwrap();
    let from_table = expr.truth_table().unwrap().minimize().unwrap();
    assert_eq!(from_table.len(), 1);
    assert_eq!(from_table[0].expression, from_expr);
    assert_eq!(from_expr.to_string(), "a * c + b");
}

#[test]
fn test_multiple_outputs_keep_names() {
    let list = Expression::parse_list("let sum = a ^ b ^ cin; let carry = a*b + cin*(a ^ b)")
        .unwrap();
    let mut table = TruthTable::new(["a", "b", "cin"]).unwrap();
    for named in &list {
        let name = named.name.as_deref().unwrap();
        table.add_expression(name, &named.expression).unwrap();
    }

    let result = table.minimize().unwrap();
    let names: Vec<&str> = result.iter().filter_map(|r| r.name.as_deref()).collect();
    assert_eq!(names, vec!["sum", "carry"]);

    // a parity function cannot be merged at all
    assert_eq!(term_count(&result[0].expression), 4);
    assert_eq!(term_count(&result[1].expression), 3);
    assert_eq!(
        FormatProfile::SHORTER.format_named(&result[1]),
        "carry = (b cin) + (a cin) + (a b)"
    );
}

#[test]
fn test_selectors_agree_on_small_instances() {
    let expr = Expression::parse("!a*!b*!c + !a*b*c + a*!b*c + a*b*!c + a*b*c").unwrap();
    let mut sizes = Vec::new();
    for kind in [
        SelectorKind::Default,
        SelectorKind::BruteForce,
        SelectorKind::BruteForceGetAll,
        SelectorKind::LargestFirst,
    ] {
        let config = MinimizerConfig {
            selector: kind,
            ..MinimizerConfig::default()
        };
        let result = expr.minimize_with_config(&config).unwrap();
        assert_eq!(result.equivalent_to(&expr), Ok(true), "{}", kind);
        sizes.push(term_count(&result));
    }
    assert!(sizes.iter().all(|&size| size == sizes[0]), "{:?}", sizes);
}

#[test]
fn test_default_selector_switches_strategy() {
    let expr = Expression::parse("A*C*D + !C*!D + !B*C").unwrap();

    let mut exact = DefaultSelector::new();
    let mut qmc = QuineMcCluskey::from_expression(&expr).unwrap();
    qmc.reduce();
    qmc.select(&mut exact).unwrap();
    assert!(exact.used_exact());

    let mut greedy = DefaultSelector::with_threshold(2);
    let mut qmc = QuineMcCluskey::from_expression(&expr).unwrap();
    qmc.reduce();
    qmc.select(&mut greedy).unwrap();
    assert!(!greedy.used_exact());
    assert!(greedy.solutions().is_none());

    let mut plain = QuineMcCluskey::from_expression(&expr).unwrap();
    plain.simplify_with(&mut LargestFirst::new()).unwrap();
    assert_eq!(plain.to_expression().equivalent_to(&expr), Ok(true));
}

#[test]
fn test_gate_mapping_end_to_end() {
    let expr = Expression::parse("a*b*c*d*e + !a*!b + c*!e").unwrap();
    let config = MinimizerConfig {
        gate_form: GateForm::Nor,
        fan_in: Some(3),
        ..MinimizerConfig::default()
    };
    let result = expr.minimize_with_config(&config).unwrap();
    assert!(result.max_fan_in() <= 3);
    assert_eq!(result.equivalent_to(&expr), Ok(true));
}

#[test]
fn test_errors_convert_to_io() {
    let err = Expression::parse("a * (b + c").unwrap_err();
    let io_err: std::io::Error = MinimizeError::from(err).into();
    assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidData);

    let names: Vec<String> = (0..21).map(|i| format!("v{}", i)).collect();
    let wide = Expression::and_all(names.iter().map(|n| Expression::variable(n)));
    assert!(matches!(wide.minimize(), Err(MinimizeError::Reduce(_))));
}
