//! Form field value objects

use crate::schema::{EditorKind, FieldDefinition, FieldValue, InputValue};

/// Length of a YYYY-MM-DD date
const DATE_LEN: usize = 10;

/// Raw editor buffer
#[derive(Debug, Clone, PartialEq)]
pub enum FieldBuffer {
    Text(String),
    Checked(bool),
}

impl Default for FieldBuffer {
    fn default() -> Self {
        FieldBuffer::Text(String::new())
    }
}

/// One editable row of an entry form, shaped by its field kind
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Storage key in the entry data
    pub name: String,
    pub label: String,
    /// Wire kind name shown as a badge
    pub badge: String,
    pub editor: EditorKind,
    pub required: bool,
    pub buffer: FieldBuffer,
}

impl FormField {
    /// Build a row for `definition` showing `value`
    pub fn for_definition(definition: &FieldDefinition, value: Option<&FieldValue>) -> Self {
        let editor = definition.kind.editor();
        let buffer = match (editor, value) {
            (EditorKind::Checkbox, Some(FieldValue::Boolean(b))) => FieldBuffer::Checked(*b),
            (EditorKind::Checkbox, _) => FieldBuffer::Checked(false),
            (_, Some(value)) => FieldBuffer::Text(value.display_value()),
            (_, None) => FieldBuffer::default(),
        };
        Self {
            name: definition.name.clone(),
            label: definition.label(),
            badge: definition.kind.as_str().to_string(),
            editor,
            required: definition.required,
            buffer,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.editor == EditorKind::MultiLine
    }

    /// Get the text value (empty for checkboxes)
    pub fn as_text(&self) -> &str {
        match &self.buffer {
            FieldBuffer::Text(s) => s,
            FieldBuffer::Checked(_) => "",
        }
    }

    /// Push a character, filtered by the editor kind
    ///
    /// Returns whether the buffer changed. Numeric editors take number
    /// characters only, date editors digits and dashes up to ten characters.
    pub fn push_char(&mut self, c: char) -> bool {
        let editor = self.editor;
        let FieldBuffer::Text(s) = &mut self.buffer else {
            return false;
        };
        let accepted = match editor {
            EditorKind::Numeric => c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'),
            EditorKind::Date => (c.is_ascii_digit() || c == '-') && s.len() < DATE_LEN,
            EditorKind::MultiLine => true,
            EditorKind::SingleLine => c != '\n',
            EditorKind::Checkbox => false,
        };
        if accepted {
            s.push(c);
        }
        accepted
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) -> bool {
        match &mut self.buffer {
            FieldBuffer::Text(s) => s.pop().is_some(),
            FieldBuffer::Checked(_) => false,
        }
    }

    /// Flip a checkbox; no-op on text editors
    pub fn toggle(&mut self) -> bool {
        match &mut self.buffer {
            FieldBuffer::Checked(b) => {
                *b = !*b;
                true
            }
            FieldBuffer::Text(_) => false,
        }
    }

    /// The buffer as editor input for the entry state
    pub fn input(&self) -> InputValue {
        match &self.buffer {
            FieldBuffer::Text(s) => InputValue::Text(s.clone()),
            FieldBuffer::Checked(b) => InputValue::Toggle(*b),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.buffer {
            FieldBuffer::Text(s) => s.clone(),
            FieldBuffer::Checked(true) => "[x]".to_string(),
            FieldBuffer::Checked(false) => "[ ]".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    fn field(kind: FieldKind, value: Option<FieldValue>) -> FormField {
        FormField::for_definition(&FieldDefinition::new("publishedAt", kind), value.as_ref())
    }

    #[test]
    fn test_for_definition_derives_presentation() {
        let f = field(FieldKind::RichText, Some(FieldValue::Text("body".into())));
        assert_eq!(f.label, "Published At");
        assert_eq!(f.badge, "richtext");
        assert!(f.is_multiline());
        assert_eq!(f.as_text(), "body");
    }

    #[test]
    fn test_number_buffer_shows_whole_numbers_plainly() {
        let f = field(FieldKind::Number, Some(FieldValue::Number(12.0)));
        assert_eq!(f.as_text(), "12");
    }

    #[test]
    fn test_numeric_editor_filters_letters() {
        let mut f = field(FieldKind::Number, None);
        assert!(f.push_char('4'));
        assert!(!f.push_char('x'));
        assert!(f.push_char('.'));
        assert!(f.push_char('5'));
        assert_eq!(f.input(), InputValue::Text("4.5".into()));
    }

    #[test]
    fn test_date_editor_caps_length() {
        let mut f = field(FieldKind::Date, None);
        for c in "2024-03-05".chars() {
            assert!(f.push_char(c));
        }
        assert!(!f.push_char('1'));
        assert!(!f.push_char('a'));
        assert_eq!(f.as_text(), "2024-03-05");
    }

    #[test]
    fn test_single_line_rejects_newline_multiline_accepts() {
        let mut single = field(FieldKind::Text, None);
        assert!(!single.push_char('\n'));
        let mut multi = field(FieldKind::RichText, None);
        assert!(multi.push_char('\n'));
    }

    #[test]
    fn test_checkbox_toggle_and_input() {
        let mut f = field(FieldKind::Boolean, Some(FieldValue::Boolean(true)));
        assert_eq!(f.input(), InputValue::Toggle(true));
        assert!(!f.push_char('x'));
        assert!(f.toggle());
        assert_eq!(f.input(), InputValue::Toggle(false));
        assert_eq!(f.display_value(), "[ ]");
    }

    #[test]
    fn test_unknown_kind_uses_single_line() {
        let f = field(FieldKind::Unknown("geo".into()), None);
        assert_eq!(f.editor, EditorKind::SingleLine);
        assert_eq!(f.badge, "geo");
    }

    #[test]
    fn test_pop_char() {
        let mut f = field(FieldKind::Text, Some(FieldValue::Text("a".into())));
        assert!(f.pop_char());
        assert_eq!(f.as_text(), "");
        assert!(!f.pop_char());
        let mut checkbox = field(FieldKind::Boolean, None);
        assert!(!checkbox.pop_char());
    }
}
