use crate::Result;
use crate::evaluation::{Evaluation, EvaluationResult, GroupResult, RuleResult, Status};
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(evaluation: &Evaluation<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    match evaluation {
        Evaluation::Completed(result) => write_result(result, use_colors, writer),
        Evaluation::Error(message) => {
            let header = "Evaluation could not be performed";
            if use_colors {
                writeln!(writer, "{}: {message}", header.red().bold())?;
            } else {
                writeln!(writer, "{header}: {message}")?;
            }
            Ok(())
        }
    }
}

fn write_result<W: Write>(result: &EvaluationResult<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    let rating = result.rating().map_or("none", |r| r.name());
    let verdict = if result.test_failed() { "FAILED" } else { "PASSED" };

    writeln!(
        writer,
        "Score  : {} of {} point(s) ({:.1}%)",
        result.points(),
        result.total_points(),
        result.points_percentage()
    )?;

    if use_colors {
        writeln!(writer, "Rating : {}", rating.bold())?;
        if result.test_failed() {
            writeln!(writer, "Test   : {}", verdict.red().bold())?;
        } else {
            writeln!(writer, "Test   : {}", verdict.green().bold())?;
        }
    } else {
        writeln!(writer, "Rating : {rating}")?;
        writeln!(writer, "Test   : {verdict}")?;
    }

    for group in result.groups() {
        writeln!(writer)?;
        write_group(group, use_colors, writer)?;
    }

    Ok(())
}

fn write_group<W: Write>(group: &GroupResult<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    let definition = group.definition();
    let title = definition.display_name();

    if !definition.is_enabled() {
        if use_colors {
            writeln!(writer, "{} {}", title.bold(), "(disabled)".dimmed())?;
        } else {
            writeln!(writer, "{title} (disabled)")?;
        }
    } else if use_colors {
        writeln!(
            writer,
            "{} ({}): {} of {} point(s)",
            title.bold(),
            definition.points_source(),
            group.points(),
            group.total_points()
        )?;
    } else {
        writeln!(
            writer,
            "{title} ({}): {} of {} point(s)",
            definition.points_source(),
            group.points(),
            group.total_points()
        )?;
    }

    let width = group.rules().iter().map(|r| r.definition().display_name().len()).max().unwrap_or(0);
    for rule in group.rules() {
        write_rule(rule, width, use_colors, writer)?;
    }

    Ok(())
}

fn write_rule<W: Write>(rule: &RuleResult<'_>, width: usize, use_colors: bool, writer: &mut W) -> Result<()> {
    let status = format!("{:<7}", rule.status().to_string());
    let status = if use_colors { colorize(rule.status(), &status) } else { status };
    let name = rule.definition().display_name();

    match rule.message() {
        Some(message) => writeln!(writer, "  {status} {name:<width$} : {message}")?,
        None => writeln!(writer, "  {status} {name}")?,
    }

    if rule.status().is_failed() || rule.status().is_error() {
        for check in rule.checks().iter().filter(|c| !c.status().is_skipped()) {
            let selector = check.definition().selector();
            match (check.error_message(), check.value()) {
                (Some(error), _) => writeln!(writer, "      #{} {selector} : {error}", check.index())?,
                (None, Some(value)) => writeln!(writer, "      #{} {selector} = '{value}' : {}", check.index(), check.status())?,
                (None, None) => writeln!(writer, "      #{} {selector} : {}", check.index(), check.status())?,
            }
        }
    }

    Ok(())
}

fn colorize(status: Status, text: &str) -> String {
    match status {
        Status::Passed => text.green().to_string(),
        Status::Failed => text.red().to_string(),
        Status::Error => text.magenta().to_string(),
        Status::Skipped => text.dimmed().to_string(),
    }
}
