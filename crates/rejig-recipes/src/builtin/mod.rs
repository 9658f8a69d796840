//! The builtin recipe catalog, grouped by the shape of code they touch.

pub mod boolean;
pub mod boxing;
pub mod collections;
pub mod control_flow;
pub mod declarations;
pub mod strings;

use crate::Recipe;

/// Every builtin recipe, in catalog order.
pub fn all() -> Vec<Box<dyn Recipe>> {
    vec![
        // Boolean expressions
        Box::new(boolean::BooleanLiteralComparison),
        Box::new(boolean::TernaryBooleanLiterals),
        Box::new(boolean::DoubleNegation),
        // Boxing and numeric literals
        Box::new(boxing::BigDecimalDoubleConstructor),
        Box::new(boxing::PrimitiveWrapperConstructor),
        Box::new(boxing::LongLiteralUppercaseSuffix),
        // Strings
        Box::new(strings::StringLiteralEquality),
        Box::new(strings::EqualsAvoidsNull),
        Box::new(strings::UseEqualsIgnoreCase),
        Box::new(strings::RedundantStringConstructor),
        // Collections
        Box::new(collections::IndexOfToContains),
        Box::new(collections::UseIsEmpty),
        Box::new(collections::ArraysAsListToListOf),
        // Control flow
        Box::new(control_flow::CollapseNestedIf),
        Box::new(control_flow::DefaultCaseLast),
        Box::new(control_flow::RemoveEmptyElse),
        Box::new(control_flow::UnnecessaryReturnParentheses),
        Box::new(control_flow::RemoveExtraSemicolons),
        // Declarations and imports
        Box::new(declarations::ObjectsEquals),
        Box::new(declarations::ExplicitInitialization),
        Box::new(declarations::ModifierOrder),
        Box::new(declarations::UseDiamondOperator),
        Box::new(declarations::RemoveUnusedImports::default()),
    ]
}
