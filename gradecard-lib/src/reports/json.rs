use crate::Result;
use crate::evaluation::Evaluation;
use core::fmt::Write;

pub fn generate<W: Write>(evaluation: &Evaluation<'_>, writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_json::to_string_pretty(evaluation)?)?;
    Ok(())
}
