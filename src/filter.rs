//! The filter entry point.

use crate::kind::KindSanitizer;
use crate::outcome::{wants_fallback, Blank};
use crate::sanitizer::{
    EmailSanitizer, FloatSanitizer, HtmlSanitizer, IntegerSanitizer, IpSanitizer, RawSanitizer,
    SanitizationErrorKind, SlashEscapeSanitizer, StringSanitizer, UrlEncodedSanitizer,
    UrlSanitizer,
};
use crate::web::{ExtractTaintedInputs, InputProvider, TaintedInputs};
use crate::{
    Error, FilterLog, FilterOptions, FilterValue, Filtered, InputSource, IpRanges,
    SanitizationError, Sanitizer, Sentinel, Tainted, ValueKind,
};

/// Reads named inputs from a request snapshot and filters them.
///
/// All lookups go through one generic operation, [`filter`](Self::filter),
/// parameterized by source and [`ValueKind`]. The typed helpers (`raw`,
/// `float`, `email`, ...) run the same pipeline with a concrete output type.
///
/// The [`Request`](InputSource::Request) source reads the form first and
/// falls back to the query string when the form value is absent, invalid or
/// empty.
///
/// # Examples
///
/// ```
/// use filter_input::{FilterInput, InputSource, Sentinel, ValueKind};
/// use filter_input::web::RequestAdapter;
///
/// let mut adapter = RequestAdapter::new("req-7".to_string());
/// adapter.add_query_string("price=1.234%2C56&site=www.example.com");
/// adapter.add_form_body("price=99");
///
/// let input = FilterInput::from_request(&adapter);
///
/// assert_eq!(input.float(InputSource::Query, "price").into_value(), Some(1234.56));
/// assert_eq!(input.float(InputSource::Request, "price").into_value(), Some(99.0));
/// assert_eq!(
///     input.url(InputSource::Query, "site", true).into_value().as_deref(),
///     Some("http://www.example.com")
/// );
/// assert_eq!(
///     input.filter_sentinel(InputSource::Cookie, "session", &ValueKind::Raw),
///     Sentinel::EmptyString
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FilterInput<P = TaintedInputs> {
    inputs: P,
    options: FilterOptions,
}

impl FilterInput<TaintedInputs> {
    /// Extracts the inputs of `request` and filters them with default options.
    pub fn from_request<R: ExtractTaintedInputs + ?Sized>(request: &R) -> Self {
        Self::new(request.extract_tainted_inputs())
    }
}

impl<P: InputProvider> FilterInput<P> {
    /// Creates a filter over `inputs` with default options.
    pub fn new(inputs: P) -> Self {
        Self::with_options(inputs, FilterOptions::default())
    }

    /// Creates a filter over `inputs` with the given options.
    pub fn with_options(inputs: P, options: FilterOptions) -> Self {
        Self { inputs, options }
    }

    /// Returns the options in effect.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Returns the underlying input provider.
    pub fn inputs(&self) -> &P {
        &self.inputs
    }

    /// Returns a logger bound to the provider's request ID.
    pub fn log(&self) -> FilterLog<'_> {
        FilterLog::new(self.inputs.request_id())
    }

    /// Returns the unfiltered input, still tainted.
    pub fn lookup(&self, source: InputSource, name: &str) -> Option<Tainted<String>> {
        self.inputs.lookup(source, name)
    }

    /// Filters the input `name` from `source` as `kind`.
    pub fn filter(&self, source: InputSource, name: &str, kind: &ValueKind) -> Filtered<FilterValue> {
        let sanitizer = KindSanitizer::new(kind, self.options.email_grammar());
        self.run(source, name, kind, &sanitizer)
    }

    /// Filters like [`filter`](Self::filter), then collapses the outcome
    /// into a [`Sentinel`] according to the options.
    pub fn filter_sentinel(&self, source: InputSource, name: &str, kind: &ValueKind) -> Sentinel {
        let on_absent = self.options.absent_sentinel(kind);
        self.filter(source, name, kind).into_sentinel(on_absent)
    }

    /// Filters with the source and kind given by name, e.g. `("post", "email")`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSource`] or [`Error::UnknownKind`] if either
    /// name is not recognized.
    pub fn filter_by_name(&self, source: &str, name: &str, kind: &str) -> Result<Sentinel, Error> {
        let source: InputSource = source.parse()?;
        let kind: ValueKind = kind.parse()?;
        Ok(self.filter_sentinel(source, name, &kind))
    }

    /// Trimmed input.
    pub fn raw(&self, source: InputSource, name: &str) -> Filtered<String> {
        self.run(source, name, &ValueKind::Raw, &RawSanitizer)
    }

    /// Input with tags and control characters stripped, quotes encoded, and
    /// optionally high characters encoded.
    pub fn string(&self, source: InputSource, name: &str, encode_high: bool) -> Filtered<String> {
        let sanitizer = if encode_high {
            StringSanitizer::encoding_high()
        } else {
            StringSanitizer::new()
        };
        self.run(source, name, &ValueKind::String { encode_high }, &sanitizer)
    }

    /// Percent-encoded input.
    pub fn string_url_encoded(&self, source: InputSource, name: &str) -> Filtered<String> {
        self.run(source, name, &ValueKind::UrlEncoded, &UrlEncodedSanitizer)
    }

    /// Input with quotes, backslash and NUL backslash-escaped.
    pub fn string_slashes(&self, source: InputSource, name: &str) -> Filtered<String> {
        self.run(source, name, &ValueKind::SlashEscaped, &SlashEscapeSanitizer)
    }

    /// HTML-escaped input.
    pub fn html(&self, source: InputSource, name: &str) -> Filtered<String> {
        self.run(source, name, &ValueKind::Html, &HtmlSanitizer)
    }

    /// Input parsed as a float.
    pub fn float(&self, source: InputSource, name: &str) -> Filtered<f64> {
        self.run(source, name, &ValueKind::Float, &FloatSanitizer)
    }

    /// Input parsed as an integer.
    pub fn integer(&self, source: InputSource, name: &str) -> Filtered<i64> {
        self.run(source, name, &ValueKind::Integer, &IntegerSanitizer)
    }

    /// Input validated as an e-mail address.
    pub fn email(&self, source: InputSource, name: &str) -> Filtered<String> {
        let sanitizer = EmailSanitizer::new(self.options.email_grammar());
        self.run(source, name, &ValueKind::Email, &sanitizer)
    }

    /// Input validated as an absolute URL.
    pub fn url(&self, source: InputSource, name: &str, add_scheme: bool) -> Filtered<String> {
        let sanitizer = if add_scheme {
            UrlSanitizer::new()
        } else {
            UrlSanitizer::without_scheme_insertion()
        };
        self.run(source, name, &ValueKind::Url { add_scheme }, &sanitizer)
    }

    /// Input validated as an IP address outside the excluded ranges.
    pub fn ip(&self, source: InputSource, name: &str, ranges: IpRanges) -> Filtered<String> {
        self.run(source, name, &ValueKind::Ip(ranges), &IpSanitizer::new(ranges))
    }

    fn run<S>(&self, source: InputSource, name: &str, kind: &ValueKind, sanitizer: &S) -> Filtered<S::Output>
    where
        S: Sanitizer,
        S::Output: Blank,
    {
        if source != InputSource::Request {
            return self.run_single(source, name, kind, sanitizer);
        }

        let form = self.run_single(InputSource::Form, name, kind, sanitizer);
        if !wants_fallback(&form) {
            return form;
        }
        self.log().fallback(name, kind);
        self.run_single(InputSource::Query, name, kind, sanitizer)
    }

    fn run_single<S: Sanitizer>(
        &self,
        source: InputSource,
        name: &str,
        kind: &ValueKind,
        sanitizer: &S,
    ) -> Filtered<S::Output> {
        let log = self.log();

        let Some(input) = self.inputs.lookup(source, name) else {
            log.absent(source, name, kind);
            return Filtered::Absent;
        };

        if let Some(max_len) = self.options.max_input_len() {
            if input.peek().len() > max_len {
                let error = SanitizationError::new(
                    SanitizationErrorKind::TooLong,
                    format!("input exceeds {} bytes", max_len),
                );
                log.rejected(source, name, kind, &error);
                return Filtered::Invalid;
            }
        }

        match sanitizer.sanitize(input) {
            Ok(verified) => Filtered::Value(verified),
            Err(error) => {
                log.rejected(source, name, kind, &error);
                Filtered::Invalid
            }
        }
    }
}
