use crate::evaluation::{AtomicValue, SelectedItem, Selector, SelectorError};
use core::fmt;
use sxd_document::dom::Document;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value, XPath};

/// Variable bound to an atomic item while one of its conditions is evaluated.
const ATOMIC_VARIABLE: &str = "value";

/// Evaluates `XPath` 1.0 expressions against an [`XmlDocument`](super::XmlDocument).
///
/// Selectors are evaluated from the document root. Conditions on a node use that node as
/// context node. An atomic item is bound to `$value` with its type intact, and every
/// standalone `.` in the condition refers to it, so `. = false()` and `not(.)` behave as
/// they would on the value itself. The document is never modified.
pub struct XPathSelector<'d> {
    document: Document<'d>,
    factory: Factory,
    context: Context<'d>,
}

impl<'d> XPathSelector<'d> {
    #[must_use]
    pub fn new(document: Document<'d>) -> Self {
        Self {
            document,
            factory: Factory::new(),
            context: Context::new(),
        }
    }

    fn compile(&self, expression: &str) -> Result<XPath, SelectorError> {
        let compile_error = |reason: String| SelectorError::Compile {
            expression: expression.to_string(),
            reason,
        };

        self.factory
            .build(expression)
            .map_err(|e| compile_error(e.to_string()))?
            .ok_or_else(|| compile_error("empty expression".to_string()))
    }

    fn run(&self, expression: &str, context: &Context<'d>, node: Node<'d>) -> Result<Value<'d>, SelectorError> {
        self.compile(expression)?
            .evaluate(context, node)
            .map_err(|e| SelectorError::Execution {
                expression: expression.to_string(),
                reason: e.to_string(),
            })
    }
}

impl<'d> Selector for XPathSelector<'d> {
    type Node = Node<'d>;

    fn select(&self, expression: &str) -> Result<Vec<SelectedItem<Node<'d>>>, SelectorError> {
        let items = match self.run(expression, &self.context, self.document.root().into())? {
            Value::Nodeset(nodes) => nodes
                .document_order()
                .into_iter()
                .map(|node| SelectedItem::Node {
                    value: node.string_value(),
                    node,
                })
                .collect(),
            Value::Boolean(b) => vec![SelectedItem::atomic(AtomicValue::Boolean(b))],
            Value::Number(n) => vec![SelectedItem::atomic(AtomicValue::Number(n))],
            Value::String(s) => vec![SelectedItem::atomic(AtomicValue::String(s))],
        };

        Ok(items)
    }

    fn test(&self, condition: &str, item: &SelectedItem<Node<'d>>) -> Result<bool, SelectorError> {
        let result = match item {
            SelectedItem::Node { node, .. } => self.run(condition, &self.context, *node)?,
            SelectedItem::Atomic { atomic, .. } => {
                let mut context = Context::new();
                context.set_variable(ATOMIC_VARIABLE, to_xpath_value(atomic));
                let condition = bind_context_item(condition, ATOMIC_VARIABLE);
                self.run(&condition, &context, self.document.root().into())?
            }
            SelectedItem::Unsupported(what) => return Err(SelectorError::Unsupported(what.clone())),
        };

        match result {
            Value::Boolean(b) => Ok(b),
            other => Err(SelectorError::NotBoolean {
                expression: condition.to_string(),
                found: kind_of(&other).to_string(),
            }),
        }
    }
}

impl fmt::Debug for XPathSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XPathSelector").finish_non_exhaustive()
    }
}

fn to_xpath_value<'d>(atomic: &AtomicValue) -> Value<'d> {
    match atomic {
        AtomicValue::Boolean(b) => Value::Boolean(*b),
        AtomicValue::Number(n) => Value::Number(*n),
        AtomicValue::String(s) => Value::String(s.clone()),
    }
}

/// Replaces every standalone `.` (the context item) in `condition` with `$variable`.
///
/// Dots inside string literals, numbers such as `1.5` or `.5`, names, and the `..` and
/// `./` steps are left alone.
fn bind_context_item(condition: &str, variable: &str) -> String {
    let chars: Vec<char> = condition.chars().collect();
    let mut rewritten = String::with_capacity(condition.len() + variable.len());
    let mut quote = None;

    for (i, &c) in chars.iter().enumerate() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            rewritten.push(c);
            continue;
        }

        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let standalone = c == '.'
            && !prev.is_some_and(|p| p.is_alphanumeric() || matches!(p, '_' | '.'))
            && !next.is_some_and(|n| n.is_alphanumeric() || matches!(n, '_' | '.' | '/'));

        if standalone {
            rewritten.push('$');
            rewritten.push_str(variable);
        } else {
            if c == '\'' || c == '"' {
                quote = Some(c);
            }
            rewritten.push(c);
        }
    }

    rewritten
}

const fn kind_of(value: &Value<'_>) -> &'static str {
    match value {
        Value::Boolean(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Nodeset(_) => "a node-set",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::XmlDocument;

    const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testreport>
  <summary>
    <transactions>
      <count>120</count>
      <errors>0</errors>
    </transactions>
    <requests name="all">
      <errors>3</errors>
      <error>timeout</error>
      <error>reset</error>
    </requests>
  </summary>
</testreport>"#;

    fn values(items: &[SelectedItem<Node<'_>>]) -> Vec<Option<String>> {
        items.iter().map(|i| i.string_value().map(str::to_string)).collect()
    }

    #[test]
    fn test_select_nodes() {
        let document = XmlDocument::parse(REPORT).unwrap();
        let selector = document.selector();

        let items = selector.select("/testreport/summary/transactions/count").unwrap();
        assert_eq!(values(&items), [Some("120".to_string())]);
        assert!(matches!(items[0], SelectedItem::Node { .. }));

        let items = selector.select("//error").unwrap();
        assert_eq!(values(&items), [Some("timeout".to_string()), Some("reset".to_string())]);

        let items = selector.select("/testreport/summary/requests/@name").unwrap();
        assert_eq!(values(&items), [Some("all".to_string())]);

        assert!(selector.select("/testreport/nothing").unwrap().is_empty());
    }

    #[test]
    fn test_select_atomic_values() {
        let document = XmlDocument::parse(REPORT).unwrap();
        let selector = document.selector();

        assert_eq!(
            selector.select("count(//error)").unwrap(),
            [SelectedItem::atomic(AtomicValue::Number(2.0))]
        );
        assert_eq!(
            selector.select("//transactions/count div 8").unwrap(),
            [SelectedItem::atomic(AtomicValue::Number(15.0))]
        );
        assert_eq!(
            selector.select("//requests/errors > 1").unwrap(),
            [SelectedItem::atomic(AtomicValue::Boolean(true))]
        );
        assert_eq!(
            selector.select("concat('a', 'b')").unwrap(),
            [SelectedItem::atomic(AtomicValue::String("ab".to_string()))]
        );

        let items = selector.select("1 div 0").unwrap();
        assert_eq!(items, [SelectedItem::atomic(AtomicValue::Number(f64::INFINITY))]);
        assert_eq!(items[0].string_value(), Some("Infinity"));
    }

    #[test]
    fn test_invalid_selector() {
        let document = XmlDocument::parse(REPORT).unwrap();
        let result = document.selector().select("/testreport/[");
        assert!(matches!(result, Err(SelectorError::Compile { .. })));
    }

    #[test]
    fn test_blank_expressions() {
        let document = XmlDocument::parse(REPORT).unwrap();
        let selector = document.selector();

        let result = selector.select("   ");
        assert!(matches!(result, Err(SelectorError::Compile { reason, .. }) if reason == "empty expression"));

        let items = selector.select("//transactions/count").unwrap();
        let result = selector.test("", &items[0]);
        assert!(matches!(result, Err(SelectorError::Compile { reason, .. }) if reason == "empty expression"));

        let result = selector.test("", &SelectedItem::atomic(AtomicValue::Number(1.0)));
        assert!(matches!(result, Err(SelectorError::Compile { .. })));
    }

    #[test]
    fn test_conditions_on_nodes() {
        let document = XmlDocument::parse(REPORT).unwrap();
        let selector = document.selector();
        let items = selector.select("/testreport/summary/requests").unwrap();

        assert!(selector.test("errors = 3", &items[0]).unwrap());
        assert!(selector.test("count(error) = 2", &items[0]).unwrap());
        assert!(!selector.test("@name = 'none'", &items[0]).unwrap());

        let count = selector.select("//transactions/count").unwrap();
        assert!(selector.test(". > 100", &count[0]).unwrap());
        assert!(!selector.test(". < 100", &count[0]).unwrap());
    }

    #[test]
    fn test_conditions_on_atomic_values() {
        let document = XmlDocument::parse(REPORT).unwrap();
        let selector = document.selector();
        let items = selector.select("count(//error)").unwrap();

        assert!(selector.test(". = 2", &items[0]).unwrap());
        assert!(selector.test(". >= 1", &items[0]).unwrap());
        assert!(!selector.test(". != 2", &items[0]).unwrap());
        assert!(selector.test(". * 2 = 4", &items[0]).unwrap());

        let text = SelectedItem::atomic(AtomicValue::String("passed".to_string()));
        assert!(selector.test(". = 'passed'", &text).unwrap());
        assert!(selector.test("starts-with(., 'pass')", &text).unwrap());
        assert!(!selector.test(". = 'a.b'", &text).unwrap());
    }

    #[test]
    fn test_conditions_on_boolean_values() {
        let document = XmlDocument::parse(REPORT).unwrap();
        let selector = document.selector();

        let items = selector.select("//requests/errors > 5").unwrap();
        assert_eq!(items[0].string_value(), Some("false"));
        assert!(selector.test(". = false()", &items[0]).unwrap());
        assert!(selector.test("not(.)", &items[0]).unwrap());
        assert!(!selector.test(". = true()", &items[0]).unwrap());

        let items = selector.select("//requests/errors > 1").unwrap();
        assert!(selector.test(". = true()", &items[0]).unwrap());
        assert!(!selector.test("not(.)", &items[0]).unwrap());
    }

    #[test]
    fn test_conditions_on_infinite_values() {
        let document = XmlDocument::parse(REPORT).unwrap();
        let selector = document.selector();
        let items = selector.select("1 div 0").unwrap();

        assert!(selector.test(". > 1000", &items[0]).unwrap());
        assert!(selector.test(". = 1 div 0", &items[0]).unwrap());
        assert!(!selector.test(". = 0", &items[0]).unwrap());
    }

    #[test]
    fn test_non_boolean_condition() {
        let document = XmlDocument::parse(REPORT).unwrap();
        let selector = document.selector();
        let items = selector.select("//transactions/count").unwrap();

        let result = selector.test("number(.)", &items[0]);
        assert!(matches!(result, Err(SelectorError::NotBoolean { .. })));

        let result = selector.test(". = ", &items[0]);
        assert!(matches!(result, Err(SelectorError::Compile { .. })));

        let result = selector.test("true()", &SelectedItem::Unsupported("a map".to_string()));
        assert!(matches!(result, Err(SelectorError::Unsupported(_))));
    }

    #[test]
    fn test_bind_context_item() {
        assert_eq!(bind_context_item(". = 2", "value"), "$value = 2");
        assert_eq!(bind_context_item("not(.)", "value"), "not($value)");
        assert_eq!(bind_context_item(". > 1.5 and . < .75", "value"), "$value > 1.5 and $value < .75");
        assert_eq!(bind_context_item(".='a.b'", "value"), "$value='a.b'");
        assert_eq!(bind_context_item(r#". != "x . y""#, "value"), r#"$value != "x . y""#);
        assert_eq!(bind_context_item("-. < 0", "value"), "-$value < 0");
        assert_eq!(bind_context_item("./a | ..", "value"), "./a | ..");
        assert_eq!(bind_context_item("my.name = 1", "value"), "my.name = 1");
    }
}
