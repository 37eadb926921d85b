//! # Routes
//!
//! URL-shaped addresses for every page. They can be typed on the command line
//! (`--route /courses/9`) exactly like a browser address, so a page must be
//! able to rebuild itself from its route alone.
//!
//! | Path                   | Page       |
//! |------------------------|------------|
//! | `/`                    | Welcome    |
//! | `/levels`              | Levels     |
//! | `/formations/:yearId`  | Formations |
//! | `/modules/:formationId`| Modules    |
//! | `/courses/:moduleId`   | Courses    |

use std::fmt;

use crate::api::Id;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Welcome,
    Levels,
    Formations { year_id: Option<Id> },
    Modules { formation_id: Option<Id> },
    Courses { module_id: Option<Id> },
}

impl Route {
    /// Parse a path. Unknown paths land on the welcome page; a missing or
    /// blank parameter is kept as `None`.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        let head = segments.next();
        let param = segments.next().and_then(Id::parse);

        match head {
            None => Route::Welcome,
            Some("levels") => Route::Levels,
            Some("formations") => Route::Formations { year_id: param },
            Some("modules") => Route::Modules {
                formation_id: param,
            },
            Some("courses") => Route::Courses { module_id: param },
            Some(_) => Route::Welcome,
        }
    }

    /// Where "back" goes when there is no history to pop.
    ///
    /// Formations, modules and courses only know their own id, not their
    /// ancestors', so they fall back to the year list.
    pub fn parent(&self) -> Route {
        match self {
            Route::Welcome | Route::Levels => Route::Welcome,
            Route::Formations { .. } | Route::Modules { .. } | Route::Courses { .. } => {
                Route::Levels
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn with_param(f: &mut fmt::Formatter<'_>, base: &str, id: &Option<Id>) -> fmt::Result {
            match id {
                Some(id) => write!(f, "/{base}/{id}"),
                None => write!(f, "/{base}"),
            }
        }
        match self {
            Route::Welcome => f.write_str("/"),
            Route::Levels => f.write_str("/levels"),
            Route::Formations { year_id } => with_param(f, "formations", year_id),
            Route::Modules { formation_id } => with_param(f, "modules", formation_id),
            Route::Courses { module_id } => with_param(f, "courses", module_id),
        }
    }
}
