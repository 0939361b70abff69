use std::collections::BTreeMap;

//==============================================================================
// Labels
//==============================================================================

/// Per-language texts, kept in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    entries: Vec<(String, String)>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the text for a language. A replaced language keeps its position.
    pub fn insert(&mut self, language: impl Into<String>, text: impl Into<String>) {
        let language = language.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(lang, _)| *lang == language) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((language, text)),
        }
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, text)| text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(lang, text)| (lang.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for Translations {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut translations = Translations::new();
        for (language, text) in iter {
            translations.insert(language, text);
        }
        translations
    }
}

/// A label (or hint): one text, or one text per language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Text(String),
    Translations(Translations),
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::Text(text.to_string())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Label::Text(text)
    }
}

impl From<Translations> for Label {
    fn from(translations: Translations) -> Self {
        Label::Translations(translations)
    }
}

//==============================================================================
// Form nodes
//==============================================================================

/// Bind or control attributes keyed by their XForm attribute name
/// (`calculate`, `relevant`, `jr:constraintMsg`, `appearance`, ...)
pub type Attributes = BTreeMap<String, String>;

/// A question without choices
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub name: String,
    /// Type identifier in any recognized vocabulary
    pub question_type: String,
    pub label: Option<Label>,
    pub hint: Option<Label>,
    pub bind: Attributes,
    pub control: Attributes,
}

impl Question {
    pub fn new(name: impl Into<String>, question_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            question_type: question_type.into(),
            label: None,
            hint: None,
            bind: Attributes::new(),
            control: Attributes::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<Label>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_bind(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.bind.insert(attribute.into(), value.into());
        self
    }

    pub fn with_control(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.control.insert(attribute.into(), value.into());
        self
    }
}

/// One choice of a multiple-choice question
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub name: String,
    pub label: Option<Label>,
}

impl ChoiceOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A select-one / select-multiple question and its choices
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoiceQuestion {
    pub question: Question,
    pub choices: Vec<ChoiceOption>,
    /// Choices depend on an earlier answer (choice filter / itemset)
    pub cascading_select: bool,
}

impl MultipleChoiceQuestion {
    pub fn new(name: impl Into<String>, question_type: impl Into<String>) -> Self {
        Self {
            question: Question::new(name, question_type),
            choices: Vec::new(),
            cascading_select: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.question.label = Some(label.into());
        self
    }

    pub fn with_choice(mut self, choice: ChoiceOption) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn cascading(mut self) -> Self {
        self.cascading_select = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.question.name
    }
}

/// A group of form nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub name: Option<String>,
    pub label: Option<Label>,
    pub children: Vec<FormNode>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<FormNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Any node of the form tree
#[derive(Debug, Clone, PartialEq)]
pub enum FormNode {
    Question(Question),
    MultipleChoice(MultipleChoiceQuestion),
    Section(Section),
    Option(ChoiceOption),
}

impl FormNode {
    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            FormNode::Question(q) => format!("question '{}'", q.name),
            FormNode::MultipleChoice(q) => format!("multiple-choice question '{}'", q.name()),
            FormNode::Section(s) => match &s.name {
                Some(name) => format!("section '{}'", name),
                None => "unnamed section".to_string(),
            },
            FormNode::Option(o) => format!("option '{}'", o.name),
        }
    }
}

impl From<Question> for FormNode {
    fn from(question: Question) -> Self {
        FormNode::Question(question)
    }
}

impl From<MultipleChoiceQuestion> for FormNode {
    fn from(question: MultipleChoiceQuestion) -> Self {
        FormNode::MultipleChoice(question)
    }
}

impl From<Section> for FormNode {
    fn from(section: Section) -> Self {
        FormNode::Section(section)
    }
}

impl From<ChoiceOption> for FormNode {
    fn from(option: ChoiceOption) -> Self {
        FormNode::Option(option)
    }
}

/// Nodes that carry a label
pub trait Labelled {
    fn label(&self) -> Option<&Label>;
}

impl Labelled for Question {
    fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }
}

impl Labelled for MultipleChoiceQuestion {
    fn label(&self) -> Option<&Label> {
        self.question.label.as_ref()
    }
}

impl Labelled for Section {
    fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }
}

impl Labelled for ChoiceOption {
    fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }
}

//==============================================================================
// Survey (root section)
//==============================================================================

/// The root of a form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Survey {
    pub name: Option<String>,
    pub id_string: Option<String>,
    pub title: Option<String>,
    pub children: Vec<FormNode>,
}

impl Survey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_string(mut self, id_string: impl Into<String>) -> Self {
        self.id_string = Some(id_string.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<FormNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Form identifier: `id_string`, else the root name
    pub fn form_id(&self) -> Option<&str> {
        self.id_string
            .as_deref()
            .filter(|id| !id.is_empty())
            .or(self.name.as_deref())
            .filter(|id| !id.is_empty())
    }

    pub fn form_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }
}
