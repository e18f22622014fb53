use tracing::{debug, debug_span};

use crate::config::DiffConfiguration;
use crate::cursor::NodeCursor;
use crate::diff::difference::{Difference, DifferenceKind};
use crate::diff::result::{DiffResult, Flow};
use crate::error::{CompareError, Side};
use crate::event::{Attribute, ElementStart, NodeEvent, NodeType};
use crate::input::XmlInput;

/// Compares a control document with a test document.
///
/// The result is computed on the first successful call to
/// [`XmlDiff::compare`] and cached; later calls return the same value.
#[derive(Debug)]
pub struct XmlDiff<'a> {
    control: &'a XmlInput,
    test: &'a XmlInput,
    config: DiffConfiguration,
    result: Option<DiffResult>,
}

impl<'a> XmlDiff<'a> {
    pub fn new(control: &'a XmlInput, test: &'a XmlInput) -> Self {
        Self::with_config(control, test, DiffConfiguration::default())
    }

    pub fn with_config(
        control: &'a XmlInput,
        test: &'a XmlInput,
        config: DiffConfiguration,
    ) -> Self {
        Self {
            control,
            test,
            config,
            result: None,
        }
    }

    /// Description from the configuration, empty when none was given.
    pub fn description(&self) -> &str {
        self.config.description()
    }

    pub fn config(&self) -> &DiffConfiguration {
        &self.config
    }

    pub fn compare(&mut self) -> Result<&DiffResult, CompareError> {
        let result = match self.result.take() {
            Some(result) => result,
            None => run(self.control, self.test, &self.config)?,
        };
        Ok(self.result.insert(result))
    }
}

/// Compare two inputs in one call.
pub fn compare_documents(
    control: &XmlInput,
    test: &XmlInput,
    config: &DiffConfiguration,
) -> Result<DiffResult, CompareError> {
    run(control, test, config)
}

/// Compare two caller-owned cursors.
///
/// The cursors are read up to the first major difference and left where the
/// comparison stopped.
pub fn compare_cursors(
    control: &mut dyn NodeCursor,
    test: &mut dyn NodeCursor,
    config: &DiffConfiguration,
) -> Result<DiffResult, CompareError> {
    let mut result = DiffResult::new();
    Engine {
        control,
        test,
        ignore_attribute_order: config.ignore_attribute_order(),
        result: &mut result,
    }
    .walk()?;
    Ok(result)
}

fn run(
    control: &XmlInput,
    test: &XmlInput,
    config: &DiffConfiguration,
) -> Result<DiffResult, CompareError> {
    if config.base_uri().is_empty() {
        return Err(CompareError::InvalidConfiguration(
            "base URI must not be empty".to_string(),
        ));
    }

    let span = debug_span!("compare", description = config.description());
    let _guard = span.enter();

    if control.same_source(test, config.base_uri()) {
        debug!("control and test are the same source");
        return Ok(DiffResult::new());
    }

    let mut control_cursor = control
        .open(config)
        .map_err(CompareError::malformed(Side::Control))?;
    let mut test_cursor = test
        .open(config)
        .map_err(CompareError::malformed(Side::Test))?;

    let result = compare_cursors(&mut control_cursor, &mut test_cursor, config)?;
    debug!(
        identical = result.identical(),
        equal = result.equal(),
        differences = result.differences().len(),
        "comparison finished"
    );
    Ok(result)
}

struct Engine<'c, 'r> {
    control: &'c mut dyn NodeCursor,
    test: &'c mut dyn NodeCursor,
    ignore_attribute_order: bool,
    result: &'r mut DiffResult,
}

impl Engine<'_, '_> {
    fn walk(&mut self) -> Result<(), CompareError> {
        loop {
            let control = self.advance(Side::Control)?;
            let test = self.advance(Side::Test)?;

            let (control, test) = match (control, test) {
                (None, None) => return Ok(()),
                (Some(control), Some(test)) => (control, test),
                (control, test) => {
                    self.record(
                        DifferenceKind::ChildListLengthMismatch,
                        control.as_ref().map(NodeEvent::node_type),
                        test.as_ref().map(NodeEvent::node_type),
                    );
                    return Ok(());
                }
            };

            let Some((control, test)) = self.compare_nodes(control, test)? else {
                return Ok(());
            };
            if let (NodeEvent::ElementStart(c), NodeEvent::ElementStart(t)) = (&control, &test) {
                if self.check_empty_closure(c, t)?.is_abort() {
                    return Ok(());
                }
            }
        }
    }

    fn advance(&mut self, side: Side) -> Result<Option<NodeEvent>, CompareError> {
        let cursor = match side {
            Side::Control => &mut *self.control,
            Side::Test => &mut *self.test,
        };
        cursor.advance().map_err(CompareError::malformed(side))
    }

    fn record(
        &mut self,
        kind: DifferenceKind,
        control: Option<NodeType>,
        test: Option<NodeType>,
    ) -> Flow {
        let difference = Difference::new(kind, control, test);
        debug!(%difference, "difference found");
        self.result.record_difference(difference)
    }

    /// Compare one pair of events, skipping a declaration present on one side
    /// only. Returns the pair that was finally compared, or `None` once the
    /// comparison has to stop.
    fn compare_nodes(
        &mut self,
        mut control: NodeEvent,
        mut test: NodeEvent,
    ) -> Result<Option<(NodeEvent, NodeEvent)>, CompareError> {
        loop {
            let control_type = control.node_type();
            let test_type = test.node_type();

            if control_type == test_type {
                let flow = match (&control, &test) {
                    (NodeEvent::ElementStart(c), NodeEvent::ElementStart(t)) => {
                        self.compare_elements(c, t)
                    }
                    (NodeEvent::Text(c), NodeEvent::Text(t)) if c != t => {
                        debug!(control = %c, test = %t, "text differs");
                        self.record(
                            DifferenceKind::TextValueMismatch,
                            Some(NodeType::Text),
                            Some(NodeType::Text),
                        )
                    }
                    _ => Flow::Continue,
                };
                return Ok((!flow.is_abort()).then_some((control, test)));
            }

            let declaration_side = if control_type == NodeType::Declaration {
                Some(Side::Control)
            } else if test_type == NodeType::Declaration {
                Some(Side::Test)
            } else {
                None
            };

            let Some(side) = declaration_side else {
                let flow = self.record(
                    DifferenceKind::NodeTypeMismatch,
                    Some(control_type),
                    Some(test_type),
                );
                return Ok((!flow.is_abort()).then_some((control, test)));
            };

            let flow = self.record(
                DifferenceKind::HasXmlDeclarationMismatch,
                Some(control_type),
                Some(test_type),
            );
            if flow.is_abort() {
                return Ok(None);
            }

            match self.advance(side)? {
                Some(next) => match side {
                    Side::Control => control = next,
                    Side::Test => test = next,
                },
                None => {
                    let (c, t) = match side {
                        Side::Control => (None, Some(test_type)),
                        Side::Test => (Some(control_type), None),
                    };
                    self.record(DifferenceKind::ChildListLengthMismatch, c, t);
                    return Ok(None);
                }
            }
        }
    }

    fn compare_elements(&mut self, control: &ElementStart, test: &ElementStart) -> Flow {
        if control.match_name() != test.match_name() {
            debug!(control = %control.name, test = %test.name, "element names differ");
            return self.record(
                DifferenceKind::ElementTagNameMismatch,
                Some(NodeType::Element),
                Some(NodeType::Element),
            );
        }

        let control_attrs = control.significant_attributes();
        let test_attrs = test.significant_attributes();
        if control_attrs.len() != test_attrs.len() {
            debug!(
                element = %control.name,
                control = control_attrs.len(),
                test = test_attrs.len(),
                "attribute counts differ"
            );
            return self.record(
                DifferenceKind::ElementAttributeCountMismatch,
                Some(NodeType::Element),
                Some(NodeType::Element),
            );
        }

        self.compare_attributes(&control_attrs, &test_attrs)
    }

    fn compare_attributes(&mut self, control: &[&Attribute], test: &[&Attribute]) -> Flow {
        let mut matched = vec![false; test.len()];

        for (index, control_attr) in control.iter().enumerate() {
            let Some(test_index) = find_counterpart(control_attr, test) else {
                debug!(attribute = %control_attr.name, "attribute missing from test element");
                let flow = self.record(
                    DifferenceKind::AttributeNameNotFound,
                    Some(NodeType::Attribute),
                    None,
                );
                if flow.is_abort() {
                    return flow;
                }
                continue;
            };
            matched[test_index] = true;

            if !self.ignore_attribute_order && test_index != index {
                let flow = self.record(
                    DifferenceKind::AttributeSequenceMismatch,
                    Some(NodeType::Attribute),
                    Some(NodeType::Attribute),
                );
                if flow.is_abort() {
                    return flow;
                }
            }

            let test_attr = test[test_index];
            if control_attr.value != test_attr.value {
                debug!(
                    attribute = %control_attr.name,
                    expected = %control_attr.value,
                    actual = %test_attr.value,
                    "attribute values differ"
                );
                let flow = self.record(
                    DifferenceKind::AttributeValueMismatch,
                    Some(NodeType::Attribute),
                    Some(NodeType::Attribute),
                );
                if flow.is_abort() {
                    return flow;
                }
            }
        }

        for (test_attr, _) in test.iter().zip(&matched).filter(|(_, seen)| !**seen) {
            debug!(attribute = %test_attr.name, "attribute missing from control element");
            let flow = self.record(
                DifferenceKind::AttributeNameNotFound,
                None,
                Some(NodeType::Attribute),
            );
            if flow.is_abort() {
                return flow;
            }
        }
        Flow::Continue
    }

    /// Reconcile `<a/>` with `<a></a>`: when exactly one side is self-closing
    /// the other side must close immediately.
    fn check_empty_closure(
        &mut self,
        control: &ElementStart,
        test: &ElementStart,
    ) -> Result<Flow, CompareError> {
        let open_side = match (control.is_empty, test.is_empty) {
            (true, false) => Side::Test,
            (false, true) => Side::Control,
            _ => return Ok(Flow::Continue),
        };

        let next = self.advance(open_side)?;
        let next_type = next.as_ref().map(NodeEvent::node_type);
        if next_type == Some(NodeType::EndElement) {
            return Ok(Flow::Continue);
        }

        let (c, t) = match open_side {
            Side::Control => (next_type, Some(NodeType::Element)),
            Side::Test => (Some(NodeType::Element), next_type),
        };
        Ok(self.record(DifferenceKind::ChildListLengthMismatch, c, t))
    }
}

fn find_counterpart(control: &Attribute, test: &[&Attribute]) -> Option<usize> {
    if control.is_namespaced() {
        test.iter().position(|candidate| {
            candidate.match_name() == control.local_name
                && candidate.namespace_uri == control.namespace_uri
        })
    } else {
        test.iter()
            .position(|candidate| candidate.match_name() == control.name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{compare_cursors, compare_documents, XmlDiff};
    use crate::config::{DiffConfiguration, WhitespaceHandling};
    use crate::cursor::ReaderCursor;
    use crate::diff::difference::DifferenceKind;
    use crate::error::{CompareError, Side};
    use crate::event::NodeType;
    use crate::input::XmlInput;

    fn kinds(control: &str, test: &str, config: &DiffConfiguration) -> Vec<DifferenceKind> {
        compare_documents(&XmlInput::from(control), &XmlInput::from(test), config)
            .expect("compare")
            .differences()
            .iter()
            .map(|d| d.kind())
            .collect()
    }

    #[test]
    fn compare_is_cached() {
        let control = XmlInput::from("<a x='1' y='2'/>");
        let test = XmlInput::from("<a y='2' x='1'/>");
        let mut diff = XmlDiff::new(&control, &test);

        let first: *const _ = diff.compare().expect("first compare");
        let second: *const _ = diff.compare().expect("second compare");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn minor_differences_accumulate_until_first_major() {
        let kinds = kinds(
            "<a x='1' y='2'><b/></a>",
            "<a y='2' x='1'><c/></a>",
            &DiffConfiguration::default(),
        );
        assert_eq!(
            kinds,
            vec![
                DifferenceKind::AttributeSequenceMismatch,
                DifferenceKind::AttributeSequenceMismatch,
                DifferenceKind::ElementTagNameMismatch,
            ]
        );
    }

    #[test]
    fn ignoring_attribute_order_makes_reordering_identical() {
        let config = DiffConfiguration::default().with_ignore_attribute_order(true);
        assert!(kinds("<a x='1' y='2'/>", "<a y='2' x='1'/>", &config).is_empty());
    }

    #[test]
    fn namespace_declarations_are_not_attributes() {
        let kinds = kinds(
            r#"<a xmlns:p="urn:p" p:id="1"/>"#,
            r#"<a xmlns:q="urn:p" q:id="1"/>"#,
            &DiffConfiguration::default(),
        );
        assert!(kinds.is_empty());
    }

    #[test]
    fn namespaced_attributes_match_on_uri() {
        let kinds = kinds(
            r#"<a xmlns:p="urn:p" xmlns:q="urn:q" p:id="1"/>"#,
            r#"<a xmlns:p="urn:p" xmlns:q="urn:q" q:id="1"/>"#,
            &DiffConfiguration::default(),
        );
        assert_eq!(kinds, vec![DifferenceKind::AttributeNameNotFound]);
    }

    #[test]
    fn attribute_missing_from_test_is_reported() {
        let kinds = kinds(
            "<a x='1'/>",
            "<a y='1'/>",
            &DiffConfiguration::default(),
        );
        assert_eq!(kinds, vec![DifferenceKind::AttributeNameNotFound]);
    }

    #[test]
    fn leading_declaration_on_one_side_is_major() {
        let result = compare_documents(
            &XmlInput::from("<?xml version=\"1.0\"?><a/>"),
            &XmlInput::from("<a/>"),
            &DiffConfiguration::default(),
        )
        .expect("compare");
        let last = result.last_difference().expect("difference");
        assert_eq!(last.kind(), DifferenceKind::HasXmlDeclarationMismatch);
        assert_eq!(last.control_node_type(), Some(NodeType::Declaration));
        assert_eq!(last.test_node_type(), Some(NodeType::Element));
        assert!(!result.equal());
    }

    #[test]
    fn text_against_element_is_node_type_mismatch() {
        assert_eq!(
            kinds("<a>x</a>", "<a><x/></a>", &DiffConfiguration::default()),
            vec![DifferenceKind::NodeTypeMismatch]
        );
    }

    #[test]
    fn empty_element_against_element_with_children() {
        let result = compare_documents(
            &XmlInput::from("<a><b/></a>"),
            &XmlInput::from("<a><b><c/></b></a>"),
            &DiffConfiguration::default(),
        )
        .expect("compare");
        let last = result.last_difference().expect("difference");
        assert_eq!(last.kind(), DifferenceKind::ChildListLengthMismatch);
        assert_eq!(last.test_node_type(), Some(NodeType::Element));
    }

    #[test]
    fn whitespace_children_count_under_all() {
        let control = "<a><b/></a>";
        let test = "<a>\n  <b/>\n</a>";
        assert_eq!(
            kinds(control, test, &DiffConfiguration::default()),
            vec![DifferenceKind::NodeTypeMismatch]
        );
        let config =
            DiffConfiguration::default().with_whitespace_handling(WhitespaceHandling::Significant);
        assert!(kinds(control, test, &config).is_empty());
    }

    #[test]
    fn malformed_test_document_is_an_error() {
        let err = compare_documents(
            &XmlInput::from("<a/>"),
            &XmlInput::from("<a>"),
            &DiffConfiguration::default(),
        )
        .expect_err("malformed input");
        assert!(matches!(
            err,
            CompareError::MalformedInput {
                side: Side::Test,
                ..
            }
        ));
    }

    #[test]
    fn empty_base_uri_is_rejected() {
        let config = DiffConfiguration::default().with_base_uri("");
        let err = compare_documents(&XmlInput::from("<a/>"), &XmlInput::from("<a/>"), &config)
            .expect_err("invalid configuration");
        assert!(matches!(err, CompareError::InvalidConfiguration(_)));
    }

    #[test]
    fn caller_owned_cursors_stop_at_first_major_difference() {
        let mut control = ReaderCursor::new("<a><b/><c/></a>".as_bytes(), true);
        let mut test = ReaderCursor::new("<z><b/><c/></z>".as_bytes(), true);
        let result = compare_cursors(&mut control, &mut test, &DiffConfiguration::default())
            .expect("compare");
        assert_eq!(result.differences().len(), 1);
        assert_eq!(
            result.last_difference().map(|d| d.kind()),
            Some(DifferenceKind::ElementTagNameMismatch)
        );
    }
}
