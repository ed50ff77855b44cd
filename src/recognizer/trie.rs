//! Byte trie recognizer
//!
//! Nodes live in a flat arena; node 0 is the root. Each node keeps its outgoing edges sorted
//! by byte so lookups binary-search them. A node carries a token when some alias ends there.
//!
//! Classification walks the input from the root and remembers the deepest accepting node it
//! passed. That node is the longest alias prefixing the input, whatever order the aliases were
//! declared in.

use crate::alias::Token;
use crate::error::NoMatch;
use crate::recognizer::{Classify, MatchTable};

#[derive(Debug, Clone)]
struct Node<T> {
    edges: Vec<(u8, usize)>,
    accept: Option<T>,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            edges: Vec::new(),
            accept: None,
        }
    }

    #[inline]
    fn child(&self, byte: u8) -> Option<usize> {
        self.edges
            .binary_search_by_key(&byte, |&(b, _)| b)
            .ok()
            .map(|i| self.edges[i].1)
    }
}

/// A compiled byte trie.
#[derive(Debug, Clone)]
pub struct Trie<T> {
    name: String,
    nodes: Vec<Node<T>>,
    max_len: usize,
}

impl<T: Token> Trie<T> {
    /// Build a trie holding every entry of `table`.
    ///
    /// The builder has already rejected conflicting duplicates, so each accepting node
    /// receives exactly one token.
    pub fn from_table(table: &MatchTable<T>) -> Self {
        let mut trie = Trie {
            name: table.name().to_string(),
            nodes: vec![Node::new()],
            max_len: 0,
        };

        for entry in table.entries() {
            trie.insert(entry.bytes().as_bytes(), entry.token().clone());
        }

        trie
    }

    fn insert(&mut self, bytes: &[u8], token: T) {
        let mut current = 0;
        for &byte in bytes {
            current = match self.nodes[current]
                .edges
                .binary_search_by_key(&byte, |&(b, _)| b)
            {
                Ok(i) => self.nodes[current].edges[i].1,
                Err(i) => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[current].edges.insert(i, (byte, next));
                    next
                }
            };
        }

        debug_assert!(self.nodes[current].accept.is_none());
        self.nodes[current].accept = Some(token);
        self.max_len = self.max_len.max(bytes.len());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<T: Token> Classify<T> for Trie<T> {
    fn classify(&self, input: &[u8]) -> Result<(T, usize), NoMatch> {
        let mut current = 0;
        let mut longest = None;

        for (depth, &byte) in input.iter().take(self.max_len).enumerate() {
            match self.nodes[current].child(byte) {
                Some(next) => current = next,
                None => break,
            }
            if let Some(token) = &self.nodes[current].accept {
                longest = Some((token, depth + 1));
            }
        }

        longest
            .map(|(token, consumed)| (token.clone(), consumed))
            .ok_or(NoMatch)
    }

    fn max_alias_len(&self) -> usize {
        self.max_len
    }
}
