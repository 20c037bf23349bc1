use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::algorithm::prereq::{display_id, extract_course_codes, normalize_code};
use crate::catalog::CatalogSnapshot;
use crate::config::DEFAULT_LABEL_SEPARATOR;
use crate::models::{GraphEdge, GraphNode, GraphOutput};

#[derive(Debug, Clone)]
pub struct CourseNode {
    /// Código canónico ("COP3503").
    pub code: String,
    /// Etiqueta para el frontend ("COP\n3503").
    pub label: String,
    pub completed: bool,
}

/// Grafo de prerequisitos: una arista A -> B indica que A es prerequisito de B.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<CourseNode, ()>,
    node_map: HashMap<String, NodeIndex>,
    separator: String,
}

impl DependencyGraph {
    pub fn new(separator: &str) -> Self {
        DependencyGraph {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            separator: separator.to_string(),
        }
    }

    fn ensure_node(&mut self, code: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(code) {
            return idx;
        }
        let node = CourseNode {
            code: code.to_string(),
            label: display_id(code, &self.separator),
            completed: false,
        };
        let idx = self.graph.add_node(node);
        self.node_map.insert(code.to_string(), idx);
        idx
    }

    fn mark_completed(&mut self, code: &str) {
        let idx = self.ensure_node(code);
        self.graph[idx].completed = true;
    }

    /// Añade `prereq -> course` si no existe ya. Los bucles se descartan.
    fn add_prerequisite(&mut self, prereq: &str, course: &str) -> bool {
        if prereq == course {
            return false;
        }
        let from = self.ensure_node(prereq);
        let to = self.ensure_node(course);
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, ());
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn completed_count(&self) -> usize {
        self.graph.node_weights().filter(|n| n.completed).count()
    }

    pub fn is_completed(&self, code: &str) -> bool {
        self.node_map
            .get(&normalize_code(code))
            .is_some_and(|&idx| self.graph[idx].completed)
    }

    fn neighbors(&self, code: &str, dir: Direction) -> Vec<String> {
        let Some(&idx) = self.node_map.get(&normalize_code(code)) else {
            return Vec::new();
        };
        // petgraph itera las aristas de la más reciente a la más antigua
        let mut out: Vec<String> = self
            .graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n].code.clone())
            .collect();
        out.reverse();
        out
    }

    /// Prerequisitos directos de `code`, en orden de inserción.
    pub fn prerequisites_of(&self, code: &str) -> Vec<String> {
        self.neighbors(code, Direction::Incoming)
    }

    /// Cursos que tienen a `code` como prerequisito directo.
    pub fn dependents_of(&self, code: &str) -> Vec<String> {
        self.neighbors(code, Direction::Outgoing)
    }

    /// Nodos y aristas listos para serializar, en orden de inserción.
    pub fn to_output(&self) -> GraphOutput {
        let nodes = self
            .graph
            .node_weights()
            .map(|n| GraphNode {
                id: n.label.clone(),
                completed: n.completed,
                classes: if n.completed { "selected" } else { "not_selected" },
            })
            .collect();
        let edges = self
            .graph
            .raw_edges()
            .iter()
            .map(|e| GraphEdge {
                source: self.graph[e.source()].label.clone(),
                target: self.graph[e.target()].label.clone(),
            })
            .collect();
        GraphOutput { nodes, edges }
    }
}

/// Construye el grafo de prerequisitos de los cursos cuyo departamento
/// contiene `selector`.
///
/// 1. Cada curso aprobado se normaliza y se añade como nodo completado.
/// 2. Con `selector` vacío el grafo queda sólo con esos nodos.
/// 3. Para cada curso filtrado (en orden del catálogo) se extraen los códigos
///    del texto de prerequisitos y se añade una arista prereq -> curso,
///    sin duplicados ni bucles.
pub fn build_dependency_graph<S: AsRef<str>>(
    snapshot: &CatalogSnapshot,
    selector: &str,
    taken_courses: &[S],
    separator: &str,
) -> DependencyGraph {
    let mut graph = DependencyGraph::new(separator);

    for raw in taken_courses {
        let code = normalize_code(raw.as_ref());
        if !code.is_empty() {
            graph.mark_completed(&code);
        }
    }

    if selector.is_empty() {
        return graph;
    }

    // un código repetido en el dataset se procesa una vez, con su primer registro
    for record in snapshot.unique_records() {
        let dept = snapshot.dept_name(&record.code).unwrap_or("");
        if !dept.contains(selector) {
            continue;
        }
        let course_code = normalize_code(&record.code);
        if course_code.is_empty() {
            continue;
        }
        for token in extract_course_codes(&record.prerequisites) {
            let prereq = normalize_code(token);
            graph.add_prerequisite(&prereq, &course_code);
        }
    }

    debug!(
        selector,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "dependency graph built"
    );
    graph
}

/// Igual que `build_dependency_graph` con el separador por defecto.
pub fn build_graph_output<S: AsRef<str>>(
    snapshot: &CatalogSnapshot,
    selector: &str,
    taken_courses: &[S],
) -> GraphOutput {
    build_dependency_graph(snapshot, selector, taken_courses, DEFAULT_LABEL_SEPARATOR).to_output()
}
