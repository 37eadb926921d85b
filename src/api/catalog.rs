//! Typed catalog endpoints.
//!
//! [`CatalogSource`] is the seam between the view-state machinery and the
//! network: the TUI holds an `Arc<dyn CatalogSource>`, tests swap in a fake.

use async_trait::async_trait;

use super::client::{ApiClient, ApiError};
use super::types::{
    CourseResource, ExamSet, Formation, Id, Module, ResourceKind, Year, sort_years,
};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn years(&self) -> Result<Vec<Year>, ApiError>;

    async fn formations(&self, year: &Id) -> Result<Vec<Formation>, ApiError>;

    async fn modules(&self, formation: &Id) -> Result<Vec<Module>, ApiError>;

    async fn resources(
        &self,
        module: &Id,
        kind: ResourceKind,
    ) -> Result<Vec<CourseResource>, ApiError>;

    /// Exams and controls attached to a single course.
    async fn exams(&self, course: &Id) -> Result<ExamSet, ApiError>;
}

pub fn years_path() -> String {
    "/years".to_string()
}

pub fn formations_path(year: &Id) -> String {
    format!("/years/{}/filieres", encode_segment(year.as_str()))
}

pub fn modules_path(formation: &Id) -> String {
    format!("/filieres/{}/modules", encode_segment(formation.as_str()))
}

pub fn resources_path(module: &Id, kind: ResourceKind) -> String {
    let leaf = match kind {
        ResourceKind::Cours => "courses",
        ResourceKind::Controls => "controls",
        ResourceKind::Efm => "efms",
    };
    format!("/modules/{}/{}", encode_segment(module.as_str()), leaf)
}

pub fn exams_path(course: &Id) -> String {
    format!("/courses/{}/exams", encode_segment(course.as_str()))
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[async_trait]
impl CatalogSource for ApiClient {
    fn name(&self) -> &str {
        "rest"
    }

    async fn years(&self) -> Result<Vec<Year>, ApiError> {
        let mut years: Vec<Year> = self.get_list(&years_path()).await?;
        sort_years(&mut years);
        Ok(years)
    }

    async fn formations(&self, year: &Id) -> Result<Vec<Formation>, ApiError> {
        self.get_list(&formations_path(year)).await
    }

    async fn modules(&self, formation: &Id) -> Result<Vec<Module>, ApiError> {
        self.get_list(&modules_path(formation)).await
    }

    async fn resources(
        &self,
        module: &Id,
        kind: ResourceKind,
    ) -> Result<Vec<CourseResource>, ApiError> {
        self.get_list(&resources_path(module, kind)).await
    }

    async fn exams(&self, course: &Id) -> Result<ExamSet, ApiError> {
        self.get_one(&exams_path(course)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> Id {
        Id::parse(raw).unwrap()
    }

    #[test]
    fn test_paths_follow_hierarchy() {
        assert_eq!(years_path(), "/years");
        assert_eq!(formations_path(&id("3")), "/years/3/filieres");
        assert_eq!(modules_path(&id("5")), "/filieres/5/modules");
        assert_eq!(exams_path(&id("11")), "/courses/11/exams");
    }

    #[test]
    fn test_resource_paths_per_kind() {
        let module = id("9");
        assert_eq!(resources_path(&module, ResourceKind::Cours), "/modules/9/courses");
        assert_eq!(resources_path(&module, ResourceKind::Controls), "/modules/9/controls");
        assert_eq!(resources_path(&module, ResourceKind::Efm), "/modules/9/efms");
    }

    #[test]
    fn test_encode_segment_escapes_separators() {
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_segment("dev-101_x.y~"), "dev-101_x.y~");
    }
}
