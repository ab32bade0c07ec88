//! Rewriting the value of a flag before the command line is launched.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Rewrites the value following a flag.
pub type Transformer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The registered transformers, by flag.
#[derive(Default, Clone)]
pub struct TransformerRegistry {
    transformers: HashMap<String, Transformer>,
}

impl TransformerRegistry {
    /// Registers `transformer` for `flag`, replacing any previous one.
    pub fn register(
        &mut self,
        flag: impl Into<String>,
        transformer: impl Fn(&str) -> String + Send + Sync + 'static,
    ) {
        let flag = flag.into();
        log::debug!("Argument transformer registered for {}", flag);
        self.transformers.insert(flag, Arc::new(transformer));
    }

    /// Returns the transformer registered for `flag`.
    pub fn lookup(&self, flag: &str) -> Option<&Transformer> {
        self.transformers.get(flag)
    }

    /// Rewrites a whitespace-separated command line.
    ///
    /// The token following a registered flag is replaced by the transformer's
    /// output and is not looked at as a flag itself. A flag ending the line is
    /// left alone. Tokens are joined back with single spaces.
    ///
    /// Quoting is not understood: a quoted value containing spaces, such as
    /// `"C:\Users\First Last\Downloads"`, is split, and only its first
    /// piece reaches the transformer.
    pub fn rewrite(&self, command: &str) -> String {
        let mut args: Vec<String> = command.split_whitespace().map(str::to_string).collect();

        let mut i = 0;
        while i < args.len() {
            match self.lookup(&args[i]) {
                Some(transformer) if i + 1 < args.len() => {
                    args[i + 1] = transformer(&args[i + 1]);
                    i += 2;
                }
                _ => i += 1,
            }
        }

        args.join(" ")
    }
}

impl fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.transformers.keys()).finish()
    }
}
