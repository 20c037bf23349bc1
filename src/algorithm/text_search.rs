// Búsqueda por palabras clave sobre código, nombre, descripción,
// prerequisitos e instructores. Cada término de la consulta debe ser prefijo
// de algún token del curso; las coincidencias exactas de `codeWithSpace` van
// primero y el resto se ordena por similitud del nombre.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::CourseRecord;

#[derive(Debug)]
struct Entry {
    record: Arc<CourseRecord>,
    tokens: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct TextIndex {
    entries: Vec<Entry>,
}

fn tokenize(s: &str, out: &mut BTreeSet<String>) {
    for tok in s.split(|c: char| !c.is_alphanumeric()) {
        if !tok.is_empty() {
            out.insert(tok.to_uppercase());
        }
    }
}

fn tokens_for(record: &CourseRecord) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    tokenize(&record.code, &mut tokens);
    tokenize(&record.code_with_space, &mut tokens);
    tokenize(&record.name, &mut tokens);
    tokenize(&record.description, &mut tokens);
    tokenize(&record.prerequisites, &mut tokens);
    for name in record.instructor_names() {
        tokenize(name, &mut tokens);
    }
    tokens
}

// Hay algún token que empieza por `term`: el primer token >= term en orden
// lexicográfico es el único candidato.
fn has_token_with_prefix(tokens: &BTreeSet<String>, term: &str) -> bool {
    tokens
        .range::<str, _>((std::ops::Bound::Included(term), std::ops::Bound::Unbounded))
        .next()
        .is_some_and(|t| t.starts_with(term))
}

impl TextIndex {
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Arc<CourseRecord>>,
    {
        let entries = records
            .into_iter()
            .map(|record| Entry { tokens: tokens_for(&record), record })
            .collect();
        TextIndex { entries }
    }

    /// Hasta `limit` cursos que contienen todos los términos de `query`,
    /// ya ordenados por relevancia.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Arc<CourseRecord>> {
        let terms: Vec<String> = query
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_uppercase())
            .collect();
        if terms.is_empty() || limit == 0 {
            return Vec::new();
        }

        let exact = query.trim().to_uppercase();
        let query_upper = query.to_uppercase();
        let mut hits: Vec<(bool, f64, usize, &Arc<CourseRecord>)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| terms.iter().all(|t| has_token_with_prefix(&e.tokens, t)))
            .map(|(pos, e)| {
                let is_exact = e.record.code_with_space.to_uppercase() == exact;
                let score = strsim::jaro_winkler(&query_upper, &e.record.name.to_uppercase());
                (is_exact, score, pos, &e.record)
            })
            .collect();

        hits.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then(b.1.total_cmp(&a.1))
                .then(a.2.cmp(&b.2))
        });
        hits.into_iter().take(limit).map(|(_, _, _, r)| Arc::clone(r)).collect()
    }
}
