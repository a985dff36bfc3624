// motif.rs - Motif occurrence scanning over raw sequences

use aho_corasick::AhoCorasick;

/// Single motif occurrence; position is 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifHit {
    pub pattern_index: usize,
    pub position: usize,
}

/// Multi-pattern scanner built once and reused across sequences
pub struct MotifScanner {
    patterns: Vec<String>,
    automaton: AhoCorasick,
}

impl MotifScanner {
    pub fn new(patterns: &[String]) -> Result<Self, String> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(patterns)
            .map_err(|e| format!("Invalid motif pattern set: {}", e))?;
        Ok(Self {
            patterns: patterns.to_vec(),
            automaton,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// All occurrences including overlapping ones, in position order
    pub fn scan(&self, raw: &str) -> Vec<MotifHit> {
        self.automaton
            .find_overlapping_iter(raw)
            .map(|m| MotifHit {
                pattern_index: m.pattern().as_usize(),
                position: m.start() + 1,
            })
            .collect()
    }

    /// Occurrence positions grouped per pattern, in pattern order
    pub fn hits_by_pattern(&self, raw: &str) -> Vec<(String, Vec<usize>)> {
        let mut grouped: Vec<Vec<usize>> = vec![Vec::new(); self.patterns.len()];
        for hit in self.scan(raw) {
            grouped[hit.pattern_index].push(hit.position);
        }
        self.patterns.iter().cloned().zip(grouped).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(patterns: &[&str]) -> MotifScanner {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        MotifScanner::new(&owned).unwrap()
    }

    #[test]
    fn test_overlapping_occurrences() {
        let hits = scanner(&["AA"]).scan("AAAA");
        let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_case_insensitive_scan() {
        let hits = scanner(&["gaattc"]).scan("GGAATTCC");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 2);
    }

    #[test]
    fn test_multiple_patterns_grouped() {
        let s = scanner(&["ATG", "TAA"]);
        let grouped = s.hits_by_pattern("ATGCCCTAAATG");

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0], ("ATG".to_string(), vec![1, 10]));
        assert_eq!(grouped[1], ("TAA".to_string(), vec![7]));
    }

    #[test]
    fn test_no_patterns() {
        let s = scanner(&[]);
        assert!(s.is_empty());
        assert!(s.scan("ACGTACGT").is_empty());
    }

    #[test]
    fn test_no_hits_in_empty_sequence() {
        assert!(scanner(&["ATG"]).scan("").is_empty());
    }
}
