use crate::database::models::Content;
use crate::locale::localized_values_for;

/// Back-fill `title` and `body` across every configured locale.
///
/// `title` is expanded on its own (missing locales take the default locale's
/// text). `body` then starts from that expanded title and lays its own
/// explicit values on top, so a locale the author never wrote a body for
/// reads the title text for that locale. Explicit body values always win.
///
/// Never fails: a record with no title text at all keeps an empty title and
/// body-derived locales only, and is rejected later by validation.
pub fn normalize(mut content: Content, locales: &[String]) -> Content {
    content.title = localized_values_for(&content.title, locales);
    content.body = content.title.merged_with(&content.body.restricted_to(locales));
    content
}
