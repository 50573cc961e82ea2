mod common;

use std::io::Cursor;

use anyhow::Result;
use common::test_session;
use tallysheet::cli::run_shell;

fn run(session: &mut tallysheet::Session, dir: &std::path::Path, script: &str) -> Result<String> {
    let mut output = Vec::new();
    run_shell(session, dir, Cursor::new(script.to_string()), &mut output)?;
    Ok(String::from_utf8(output)?)
}

#[test]
fn test_shell_adds_and_deletes() -> Result<()> {
    let (mut session, temp) = test_session()?;

    let output = run(&mut session, temp.path(), "15.5\ndelete 2\n")?;

    assert!(output.contains("Added #5: 15.50"));
    assert!(output.contains("Total: 1565.52"));
    assert!(output.contains("Deleted #2: 500.00"));
    assert!(output.contains("Total: 1065.52"));
    assert_eq!(session.ledger().len(), 4);
    Ok(())
}

#[test]
fn test_shell_ignores_invalid_input() -> Result<()> {
    let (mut session, temp) = test_session()?;

    let output = run(&mut session, temp.path(), "\nabc\ndelete 99\ntotal\n")?;

    assert!(output.contains("not a finite number: abc"));
    assert!(output.contains("No entry #99"));
    assert!(output.contains("Total: 1550.02"));
    assert_eq!(session.ledger().len(), 4);
    assert_eq!(session.input(), "abc");
    Ok(())
}

#[test]
fn test_shell_exports_reports() -> Result<()> {
    let (mut session, temp) = test_session()?;

    let output = run(&mut session, temp.path(), "export csv\nexport pdf\n")?;

    assert!(output.contains("Exported 4 entries"));
    assert!(temp.path().join("calculator-report.csv").exists());
    assert!(temp.path().join("calculator-report.pdf").exists());
    Ok(())
}

#[test]
fn test_shell_stops_at_quit() -> Result<()> {
    let (mut session, temp) = test_session()?;

    run(&mut session, temp.path(), "1\nquit\n2\n")?;

    assert_eq!(session.ledger().len(), 5);
    Ok(())
}

#[test]
fn test_shell_json_listing() -> Result<()> {
    let (mut session, temp) = test_session()?;

    let output = run(&mut session, temp.path(), "list --json\n")?;
    let json_start = output.find('{').unwrap();
    let listing: serde_json::Value = serde_json::from_str(&output[json_start..])?;

    assert_eq!(listing["entries"].as_array().map(|a| a.len()), Some(4));
    assert_eq!(listing["entries"][3]["id"], 4);
    assert_eq!(listing["entries"][3]["value"], 30.02);
    Ok(())
}
