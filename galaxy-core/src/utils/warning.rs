use std::{path::PathBuf, rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use termcolor::Buffer;

use crate::loader::error::LoadWarning;
use super::diagnostic::{Diagnostic, Label, Level, Location};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        let mut warnings = self.write_lock();
        std::mem::take(&mut *warnings)
    }

    pub fn len(&self) -> usize {
        self.warnings.read().expect("Vector lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

/// Counts warnings on their way to the underlying sink.
pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullWarningEmitterIO))
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

/// Attaches the program's path and source to loader warnings.
pub struct ProgramWarningEmitter<'a> {
    path: PathBuf,
    src: &'a str,
    emitter: WarningEmitter,
}

impl<'a> ProgramWarningEmitter<'a> {
    pub fn new(path: PathBuf, src: &'a str, emitter: WarningEmitter) -> Self {
        Self {
            path,
            src,
            emitter,
        }
    }

    pub fn emit(&self, warning: LoadWarning) {
        self.emitter.emit(Warning::Program {
            path: self.path.clone(),
            src: self.src.to_string(),
            warning,
        });
    }

    pub fn count(&self) -> usize {
        self.emitter.count()
    }
}

#[derive(Debug, Clone)]
pub enum Warning {
    Program {
        path: PathBuf,
        src: String,
        warning: LoadWarning
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Warning printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("warning pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::Program {
                path,
                src,
                warning
            } => match warning {
                LoadWarning::Redefinition { name, first, second } => {
                    Diagnostic {
                        title: "Duplicate definition".into(),
                        text: format!("`{name}` is defined more than once."),
                        hint: Some("The last definition is the one in effect.".into()),
                        level: Level::Warning,
                        location: Some(Location {
                            src,
                            path: path.to_path_buf(),
                            label: Label {
                                text: Some("Redefined here".into()),
                                span: *second,
                            },
                            extra_labels: vec![Label {
                                text: Some("First defined here".into()),
                                span: *first,
                            }]
                        }),
                    }
                },
                LoadWarning::ShadowedCombinator { name, location } => {
                    Diagnostic {
                        title: "Built-in shadowed".into(),
                        text: format!("`{name}` is a built-in combinator."),
                        hint: None,
                        level: Level::Warning,
                        location: Some(Location {
                            src,
                            path: path.to_path_buf(),
                            label: Label {
                                text: Some("This definition replaces it".into()),
                                span: *location,
                            },
                            extra_labels: vec![]
                        }),
                    }
                },
            }
        }
    }
}
