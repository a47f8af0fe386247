/// Build a message from a template, substituting `{key}` placeholders.
///
/// ```
/// use tune_messages::{msg, MESSAGES};
/// let text = msg!(MESSAGES.preset_applied, preset = "ultra");
/// assert_eq!(text, "Applied preset: ultra");
/// ```
#[macro_export]
macro_rules! msg {
    ($template:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::builder::MessageBuilder::new($template)
            $(.var(stringify!($key), $value))*
            .build()
    };
}
