// Extracción de códigos de curso desde el texto libre de prerequisitos y
// normalización de códigos (sufijos de sección/laboratorio).

use regex::Regex;
use std::sync::LazyLock;

// Tres mayúsculas, un espacio, cuatro dígitos: "COP 3503". El sufijo de letra
// que pueda seguir a los dígitos queda fuera del match.
static COURSE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]{3}\s[0-9]{4}").unwrap_or_else(|e| panic!("invalid course code pattern: {e}"))
});

/// Devuelve los códigos de curso embebidos en `text`, en orden de aparición
/// y sin solaparse. Texto que no contiene códigos produce una lista vacía.
pub fn extract_course_codes(text: &str) -> Vec<&str> {
    COURSE_CODE_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Código canónico: mayúsculas, sin espacios y sin la cola de letras de
/// sección ("COP 3503C" -> "COP3503"). Letras iniciales o intermedias y
/// dígitos finales se conservan.
pub fn normalize_code(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    compact.trim_end_matches(|c: char| c.is_ascii_uppercase()).to_string()
}

/// Identificador de nodo para el grafo: prefijo de departamento, separador
/// y el resto del código canónico ("COP3503" -> "COP\n3503").
pub fn display_id(canonical: &str, separator: &str) -> String {
    match canonical.char_indices().nth(3) {
        Some((split, _)) => format!("{}{}{}", &canonical[..split], separator, &canonical[split..]),
        None => canonical.to_string(),
    }
}
