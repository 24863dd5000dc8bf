/// Declarative description of the client side of a callback.
///
/// `args` are the parameters of the widget's native callback, `fields` map
/// wire parameter names to client expressions evaluated over those args.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSpec {
    args: Vec<&'static str>,
    fields: Vec<(&'static str, String)>,
    suffix: Option<&'static str>,
}

impl ParamSpec {
    pub fn new(args: &[&'static str]) -> Self {
        Self {
            args: args.to_vec(),
            ..Self::default()
        }
    }

    /// Send `expr` as parameter `name`.
    pub fn field(mut self, name: &'static str, expr: impl Into<String>) -> Self {
        self.fields.push((name, expr.into()));
        self
    }

    /// Statement appended to the callback body after the request is issued.
    pub fn suffix(mut self, statement: &'static str) -> Self {
        self.suffix = Some(statement);
        self
    }

    pub fn args(&self) -> &[&'static str] {
        &self.args
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn body_suffix(&self) -> Option<&'static str> {
        self.suffix
    }

    /// Client expression concatenating every field onto a URL string.
    ///
    /// Each value goes through `encodeURIComponent` so it arrives exactly as
    /// the codec's `encode` would have written it.
    pub fn query_expression(&self) -> String {
        self.fields
            .iter()
            .map(|(name, expr)| {
                format!(
                    " + '&{}=' + encodeURIComponent({})",
                    urlencoding::encode(name),
                    expr
                )
            })
            .collect()
    }
}
