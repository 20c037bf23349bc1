// Estructuras de datos compartidas: registros del catálogo tal como llegan
// del scraper y los DTOs del grafo que consume el frontend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Instructor de una sección. Campos extra (avgRating, avgDifficulty, ...)
/// se preservan tal cual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "deptName", default)]
    pub dept_name: String,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Registro de un curso del catálogo. Inmutable después de la carga.
///
/// Sólo `code` es obligatorio; el resto toma valores vacíos por defecto.
/// Cualquier campo desconocido (termInd, credits, ...) queda en `extra`
/// y se devuelve sin cambios en las búsquedas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub code: String,
    #[serde(rename = "codeWithSpace", default)]
    pub code_with_space: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prerequisites: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseRecord {
    /// Departamento del curso: el `deptName` de la primera sección.
    pub fn dept_name(&self) -> &str {
        self.sections.first().map(|s| s.dept_name.as_str()).unwrap_or("")
    }

    pub fn instructor_names(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.instructors.iter())
            .map(|i| i.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub completed: bool,
    /// "selected" / "not_selected", las clases que usa la hoja de estilos de cytoscape.
    pub classes: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// Salida serializable del grafo de prerequisitos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphOutput {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_record_preserves_unknown_fields() {
        let raw = r#"{
            "code": "COP3503C",
            "codeWithSpace": "COP 3503C",
            "name": "Programming Fundamentals 2",
            "termInd": "C",
            "sections": [
                {"deptName": "Computer & Information Science & Engineering",
                 "instructors": [{"name": "Jane Doe", "avgRating": 4.5}],
                 "number": "12345"}
            ]
        }"#;
        let course: CourseRecord = serde_json::from_str(raw).expect("debe parsear el curso");
        assert_eq!(course.code, "COP3503C");
        assert_eq!(course.prerequisites, "");
        assert_eq!(course.dept_name(), "Computer & Information Science & Engineering");
        assert_eq!(course.instructor_names().collect::<Vec<_>>(), vec!["Jane Doe"]);

        let back = serde_json::to_value(&course).unwrap();
        assert_eq!(back["termInd"], "C");
        assert_eq!(back["sections"][0]["number"], "12345");
        assert_eq!(back["sections"][0]["instructors"][0]["avgRating"], 4.5);
    }

    #[test]
    fn test_dept_name_without_sections_is_empty() {
        let course: CourseRecord = serde_json::from_str(r#"{"code": "MAC2311"}"#).unwrap();
        assert_eq!(course.dept_name(), "");
    }
}
