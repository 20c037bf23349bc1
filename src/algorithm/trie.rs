//! Índice de prefijos (trie) sobre los códigos de curso.
//!
//! Cada nodo guarda sus hijos ordenados por carácter, de modo que el
//! recorrido en profundidad es determinista: primero los registros del
//! propio nodo, luego los hijos en orden ascendente.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::CourseRecord;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
    records: Vec<Arc<CourseRecord>>,
}

#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    len: usize,
}

/// Clave de indexación: mayúsculas y sin espacios. Se aplica igual a los
/// códigos y a las consultas.
pub fn index_key(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construye un índice nuevo a partir de los registros, en orden.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Arc<CourseRecord>>,
    {
        let mut index = PrefixIndex::new();
        for r in records {
            index.insert(r);
        }
        index
    }

    pub fn insert(&mut self, record: Arc<CourseRecord>) {
        let key = index_key(&record.code);
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.terminal = true;
        node.records.push(record);
        self.len += 1;
    }

    /// Número de registros indexados.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn descend(&self, key: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Registros cuyo código comienza con `prefix`, como máximo `limit`.
    ///
    /// Un prefijo vacío o sin coincidencias devuelve una lista vacía.
    pub fn query(&self, prefix: &str, limit: usize) -> Vec<Arc<CourseRecord>> {
        let key = index_key(prefix);
        if key.is_empty() || limit == 0 {
            return Vec::new();
        }
        let Some(start) = self.descend(&key) else {
            return Vec::new();
        };

        let mut out: Vec<Arc<CourseRecord>> = Vec::with_capacity(limit.min(64));
        let mut stack: Vec<&TrieNode> = vec![start];
        while let Some(node) = stack.pop() {
            let remaining = limit - out.len();
            if node.terminal {
                out.extend(node.records.iter().take(remaining).cloned());
                if out.len() == limit {
                    break;
                }
            }
            // en orden inverso para que el menor carácter salga primero
            stack.extend(node.children.values().rev());
        }
        out
    }

    /// Todos los registros exactamente con este código (tras normalizar).
    pub fn exact(&self, code: &str) -> &[Arc<CourseRecord>] {
        match self.descend(&index_key(code)) {
            Some(node) if node.terminal => &node.records,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str) -> Arc<CourseRecord> {
        Arc::new(CourseRecord {
            code: code.to_string(),
            ..Default::default()
        })
    }

    fn codes(v: &[Arc<CourseRecord>]) -> Vec<&str> {
        v.iter().map(|r| r.code.as_str()).collect()
    }

    #[test]
    fn test_query_prefix_basic() {
        let idx = PrefixIndex::build(["CEN3031", "CEN3041", "CDA3101"].map(course));
        assert_eq!(idx.len(), 3);
        assert_eq!(codes(&idx.query("CE", 10)), vec!["CEN3031", "CEN3041"]);
        assert_eq!(codes(&idx.query("CD", 10)), vec!["CDA3101"]);
        assert!(idx.query("X", 10).is_empty());
        assert!(idx.query("CEN30311", 10).is_empty());
    }

    #[test]
    fn test_query_normalizes_case_and_whitespace() {
        let idx = PrefixIndex::build(["COP3503C", "COP3502C"].map(course));
        assert_eq!(codes(&idx.query("cop 350", 10)), vec!["COP3502C", "COP3503C"]);
        assert_eq!(codes(&idx.query(" cop3503 ", 10)), vec!["COP3503C"]);
    }

    #[test]
    fn test_shorter_code_comes_before_its_extensions() {
        let idx = PrefixIndex::build(["COP3503C", "COP3503", "COP3502"].map(course));
        assert_eq!(codes(&idx.query("COP3503", 10)), vec!["COP3503", "COP3503C"]);
        assert_eq!(codes(&idx.query("COP", 10)), vec!["COP3502", "COP3503", "COP3503C"]);
    }

    #[test]
    fn test_limit_takes_partial_node_records() {
        let mut idx = PrefixIndex::new();
        for n in 0..5 {
            let mut r = CourseRecord { code: "MAC2311".to_string(), ..Default::default() };
            r.name = format!("dup {n}");
            idx.insert(Arc::new(r));
        }
        idx.insert(course("MAC2312"));

        let got = idx.query("MAC", 3);
        assert_eq!(got.len(), 3);
        let names: Vec<&str> = got.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["dup 0", "dup 1", "dup 2"]);
        assert_eq!(idx.exact("mac 2311").len(), 5);
        assert!(idx.exact("MAC231").is_empty());
    }

    #[test]
    fn test_zero_limit_and_empty_prefix() {
        let idx = PrefixIndex::build(["COP3503C"].map(course));
        assert!(idx.query("COP", 0).is_empty());
        assert!(idx.query("", 10).is_empty());
        assert!(idx.query("   ", 10).is_empty());
    }
}
