//! Application state - single source of truth
//!
//! Components only read it (as props); the reducer is the only writer.

use crate::entity::{Course, Entity, EntityKind, Record, RecordFields, RecordId, Student};

/// Spinner frame interval used by the default `--tick-ms`.
pub const LOADING_ANIM_TICK_MS: u64 = 120;

/// Route selected by navigation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    StudentsList,
    StudentsForm,
    CoursesList,
    CoursesForm,
}

impl View {
    /// Entries of the sidebar, in order
    pub const NAV: [View; 3] = [View::Dashboard, View::StudentsList, View::CoursesList];

    pub fn list(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Student => View::StudentsList,
            EntityKind::Course => View::CoursesList,
        }
    }

    pub fn form(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Student => View::StudentsForm,
            EntityKind::Course => View::CoursesForm,
        }
    }

    /// Kind of entity this view belongs to, list or form.
    pub fn kind(self) -> Option<EntityKind> {
        match self {
            View::Dashboard => None,
            View::StudentsList | View::StudentsForm => Some(EntityKind::Student),
            View::CoursesList | View::CoursesForm => Some(EntityKind::Course),
        }
    }

    pub fn is_form(self) -> bool {
        matches!(self, View::StudentsForm | View::CoursesForm)
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::StudentsList | View::StudentsForm => "Students",
            View::CoursesList | View::CoursesForm => "Courses",
        }
    }
}

/// What actually gets drawn in the content area
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    List(EntityKind),
    Form(EntityKind),
}

/// Editable field of the form; the business key is read-only
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Secondary,
}

impl FormField {
    pub fn toggle(self) -> Self {
        match self {
            FormField::Name => FormField::Secondary,
            FormField::Secondary => FormField::Name,
        }
    }

    pub fn label(self, kind: EntityKind) -> &'static str {
        match self {
            FormField::Name => match kind {
                EntityKind::Student => "Student Name",
                EntityKind::Course => "Course Name",
            },
            FormField::Secondary => kind.secondary_label(),
        }
    }
}

/// Values of the open form, kept until a save succeeds or the form is cancelled
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormDraft {
    pub kind: EntityKind,
    pub business_key: String,
    pub name: String,
    pub secondary: String,
    pub focus: FormField,
}

impl FormDraft {
    /// Empty draft with a freshly generated business key.
    pub fn blank(kind: EntityKind) -> Self {
        Self {
            kind,
            business_key: kind.fresh_key(),
            name: String::new(),
            secondary: String::new(),
            focus: FormField::Name,
        }
    }

    /// Draft seeded from an existing record; its business key is kept.
    pub fn from_record(record: &Record) -> Self {
        Self {
            kind: record.kind(),
            business_key: record.business_key().to_string(),
            name: record.name().to_string(),
            secondary: record.secondary().to_string(),
            focus: FormField::Name,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Secondary => &self.secondary,
        }
    }

    pub fn set_value(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Secondary => self.secondary = value,
        }
    }

    /// First required field that is blank, if any.
    pub fn missing_field(&self) -> Option<FormField> {
        [FormField::Name, FormField::Secondary]
            .into_iter()
            .find(|field| self.value(*field).trim().is_empty())
    }

    /// Request payload: business fields only.
    pub fn to_fields(&self) -> RecordFields {
        RecordFields::from_parts(self.kind, &self.business_key, &self.name, &self.secondary)
    }
}

/// Which pane receives navigation keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    #[default]
    Content,
}

/// Delete awaiting a yes/no answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: EntityKind,
    pub id: RecordId,
    pub label: String,
}

/// Mutations with a request outstanding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InFlight {
    pub saving: bool,
    pub deleting: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState {
    pub active_view: View,
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    /// Record being edited; `None` while adding or browsing
    pub edit_target: Option<Record>,
    pub loading: bool,

    pub form: Option<FormDraft>,
    pub selected_student: usize,
    pub selected_course: usize,
    pub focus: Focus,
    pub pending_delete: Option<PendingDelete>,
    pub in_flight: InFlight,
    /// Last recoverable error, shown in the status bar
    pub notice: Option<String>,

    /// Animation frame counter (for the loading spinner)
    pub tick_count: u32,
    pub terminal_size: (u16, u16),
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_view: View::Dashboard,
            students: Vec::new(),
            courses: Vec::new(),
            edit_target: None,
            loading: false,
            form: None,
            selected_student: 0,
            selected_course: 0,
            focus: Focus::Content,
            pending_delete: None,
            in_flight: InFlight::default(),
            notice: None,
            tick_count: 0,
            terminal_size: (80, 24),
        }
    }
}

impl AppState {
    /// Resolve the active view and edit target into what gets drawn.
    ///
    /// A kind's form shows on its add route, or on its list route while a
    /// record of that kind is the edit target.
    pub fn screen(&self) -> Screen {
        let editing = |kind| {
            self.edit_target
                .as_ref()
                .is_some_and(|record| record.kind() == kind)
        };
        match self.active_view {
            View::Dashboard => Screen::Dashboard,
            View::StudentsForm => Screen::Form(EntityKind::Student),
            View::CoursesForm => Screen::Form(EntityKind::Course),
            View::StudentsList if editing(EntityKind::Student) => Screen::Form(EntityKind::Student),
            View::CoursesList if editing(EntityKind::Course) => Screen::Form(EntityKind::Course),
            View::StudentsList => Screen::List(EntityKind::Student),
            View::CoursesList => Screen::List(EntityKind::Course),
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Student => self.students.len(),
            EntityKind::Course => self.courses.len(),
        }
    }

    /// Records of `kind` in server order.
    pub fn records(&self, kind: EntityKind) -> Vec<Record> {
        match kind {
            EntityKind::Student => self.students.iter().cloned().map(Record::from).collect(),
            EntityKind::Course => self.courses.iter().cloned().map(Record::from).collect(),
        }
    }

    /// Name of the first record of `kind`, as the dashboard reports it.
    pub fn first_name(&self, kind: EntityKind) -> Option<&str> {
        match kind {
            EntityKind::Student => self.students.first().map(Entity::name),
            EntityKind::Course => self.courses.first().map(Entity::name),
        }
    }

    /// Display name of the record with `id`.
    pub fn name_of(&self, kind: EntityKind, id: &RecordId) -> Option<&str> {
        match kind {
            EntityKind::Student => find_by_id(&self.students, id).map(Entity::name),
            EntityKind::Course => find_by_id(&self.courses, id).map(Entity::name),
        }
    }

    pub fn selected(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Student => self.selected_student,
            EntityKind::Course => self.selected_course,
        }
    }

    /// Set the list cursor of `kind`, clamped to the collection.
    pub fn select(&mut self, kind: EntityKind, index: usize) -> bool {
        let clamped = index.min(self.count(kind).saturating_sub(1));
        let slot = match kind {
            EntityKind::Student => &mut self.selected_student,
            EntityKind::Course => &mut self.selected_course,
        };
        let changed = *slot != clamped;
        *slot = clamped;
        changed
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.in_flight.saving || self.in_flight.deleting
    }
}

fn find_by_id<'a, E: Entity>(items: &'a [E], id: &RecordId) -> Option<&'a E> {
    items.iter().find(|item| item.id() == Some(id))
}
