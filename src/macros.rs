/// Builds a `Vec<Pair>` of context pairs from `name => value` arms.
///
/// Both sides accept anything `String::from` does (`&str` or `String`);
/// format other values with `to_string()` at the call site.
///
/// # Examples
///
/// ```
/// use task_rail::pairs;
///
/// let empty = pairs![];
/// assert!(empty.is_empty());
///
/// let pairs = pairs!["request_id" => "7", "user" => 42.to_string()];
/// assert_eq!(pairs[1], ("user".to_string(), "42".to_string()));
/// ```
#[macro_export]
macro_rules! pairs {
    () => {
        ::std::vec::Vec::<$crate::Pair>::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        ::std::vec![
            $( (::std::string::String::from($name), ::std::string::String::from($value)) ),+
        ]
    };
}
