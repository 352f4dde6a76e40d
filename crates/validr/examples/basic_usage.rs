//! Basic usage example for validr

use serde_json::{Value, json};
use validr::prelude::*;

fn choice(args: &mut Arguments) -> Result<BoxedValidator, SchemaError> {
    let items = args.rest().into_iter().map(Value::from);
    Ok(Box::new(EnumValidator::new(items)))
}

fn main() -> Result<(), SchemaError> {
    // show the compiler's debug events
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let compiler = Compiler::builder().validator("choice", choice).build()?;

    let schemas = [
        ("int(min=0,max=100)", json!("42")),
        ("int(min=0,max=100)", json!(101)),
        (r#"choice("A","B","C","D")"#, json!("E")),
        ("choice&optional", Value::Null),
        (r#"str(maxlen=10,escape=true)&default="n/a""#, Value::Null),
        ("email", json!("alice@example.com")),
        ("ipv6", json!("2001::25de::cade")),
    ];

    for (expression, input) in schemas {
        let validator = compiler.parse(expression)?;
        match validator.validate(&input) {
            Ok(value) => println!("✓ {expression} accepts {input} -> {value}"),
            Err(e) => println!("✗ {expression} rejects {input}: {e}"),
        }
    }

    let broken = "int(min=0&optional";
    if let Err(e) = compiler.parse(broken) {
        println!("\n{}", e.render(broken));
    }

    Ok(())
}
