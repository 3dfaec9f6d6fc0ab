//! Requester id sent in the `X-Kindroid-Requester` header

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Longest requester id the endpoint accepts
pub const MAX_REQUESTER_ID_LEN: usize = 32;

/// Characters URI components leave unescaped besides alphanumerics
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'\'')
  .remove(b'(')
  .remove(b')');

/// Derive the requester id for a speaker.
///
/// The username is percent-encoded as a URI component, the encoded
/// bytes are base64'd, everything but ASCII letters and digits is
/// dropped and the result is cut to [`MAX_REQUESTER_ID_LEN`]. The order
/// of those steps matters for the endpoint to recognise the id.
pub fn requester_id(username: &str) -> String
{   let encoded = utf8_percent_encode(username, URI_COMPONENT)
      .to_string();

    STANDARD.encode(encoded.as_bytes())
      .chars()
      .filter(|c| c.is_ascii_alphanumeric())
      .take(MAX_REQUESTER_ID_LEN)
      .collect()
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn encodes_before_base64()
    {   // "Ann%20Q." -> "QW5uJTIwUS4="
        assert_eq!(requester_id("Ann Q."), "QW5uJTIwUS4");
        assert_eq!(requester_id("bob"), "Ym9i");
    }

    #[test]
    fn reserved_characters_are_escaped()
    {   // "a%2Fb%3Fc%3Dd%26e"
        assert_eq!(
          requester_id("a/b?c=d&e"),
          "YSUyRmIlM0ZjJTNEZCUyNmU"
        );
    }

    #[test]
    fn uri_component_marks_are_left_alone()
    {   // "it's%20(ok)!"
        assert_eq!(requester_id("it's (ok)!"), "aXQncyUyMChvaykh");
        // "a-b_c.d~e*f" is already a valid component
        assert_eq!(requester_id("a-b_c.d~e*f"), "YS1iX2MuZH5lKmY");
    }

    #[test]
    fn long_unicode_is_truncated()
    {   let id = requester_id("あいうえおかき");
        assert_eq!(id, "JUUzJTgxJTgyJUUzJTgxJTg0JUUzJTgx");
        assert_eq!(id.len(), MAX_REQUESTER_ID_LEN);
    }

    #[test]
    fn empty_username_gives_empty_id()
    {   assert_eq!(requester_id(""), "");
    }

    #[test]
    fn id_is_alphanumeric_and_bounded()
    {   let inputs = [
          ""
        , " "
        , "+/="
        , "名前 with spaces & symbols #?%"
        , "🦀🦀🦀🦀🦀🦀🦀🦀🦀🦀"
        , "a much longer display name that keeps going and going"
        , "\u{0}\n\t"
        ];
        for input in inputs
        {   let id = requester_id(input);
            assert!(id.len() <= MAX_REQUESTER_ID_LEN, "{:?}", input);
            assert!(
              id.chars().all(|c| c.is_ascii_alphanumeric()),
              "{:?} -> {:?}", input, id
            );
            assert_eq!(id, requester_id(input));
        }
    }
}
