//! List rules command implementation.

use log_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<22} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(90));

    for rule in all_rules() {
        println!(
            "{:<8} {:<22} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - LL001, LL002, LL003 (default)");
    println!("  minimal      - LL001 only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  log-lint check --rules only-message-logged,log-and-rethrow");
    println!("  log-lint check --rules LL001");
}
