use strum_macros::{Display, IntoStaticStr};

// https://www.iana.org/assignments/http-status-codes/http-status-codes.xhtml

/// The statuses this server answers with. Display gives the reason phrase.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, IntoStaticStr)]
#[repr(u16)]
pub enum Status {
    #[strum(serialize = "OK")]
    OK = 200,
    #[strum(serialize = "Created")]
    Created = 201,
    #[strum(serialize = "Bad Request")]
    BadRequest = 400,
    #[strum(serialize = "Not Found")]
    NotFound = 404,
    #[strum(serialize = "Method Not Allowed")]
    MethodNotAllowed = 405,
    #[strum(serialize = "Content Too Large")]
    ContentTooLarge = 413,
    #[strum(serialize = "URI Too Long")]
    URITooLong = 414,
    #[strum(serialize = "Internal Server Error")]
    InternalServerError = 500,
}

impl Status {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn reason_phrase(self) -> &'static str {
        self.into()
    }
}
