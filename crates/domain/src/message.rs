//! In-memory model of an RFC 1035 §4 message.
//!
//! Values here are plain data; the wire codec lives in the infrastructure
//! crate.

pub mod header;
pub mod question;
pub mod resource_record;

pub use header::{Header, OpCode, ResponseCode};
pub use question::Question;
pub use resource_record::{RData, ResourceRecord};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl Message {
    /// Builds a standard, non-recursive query for a single question.
    pub fn request(id: u16, question: Question) -> Self {
        let mut message = Self {
            header: Header {
                id,
                opcode: OpCode::Query,
                ..Header::default()
            },
            questions: vec![question],
            ..Self::default()
        };
        message.sync_counts();
        message
    }

    /// Builds an empty response echoing the id and questions of `request`.
    pub fn reply_to(request: &Message) -> Self {
        let mut message = Self {
            header: Header {
                id: request.header.id,
                is_response: true,
                opcode: request.header.opcode,
                recursion_desired: request.header.recursion_desired,
                ..Header::default()
            },
            questions: request.questions.clone(),
            ..Self::default()
        };
        message.sync_counts();
        message
    }

    pub fn with_answer(mut self, record: ResourceRecord) -> Self {
        self.answers.push(record);
        self.sync_counts();
        self
    }

    pub fn with_authority(mut self, record: ResourceRecord) -> Self {
        self.authority.push(record);
        self.sync_counts();
        self
    }

    pub fn with_additional(mut self, record: ResourceRecord) -> Self {
        self.additional.push(record);
        self.sync_counts();
        self
    }

    /// Rewrites the header section counts from the section lengths.
    pub fn sync_counts(&mut self) {
        self.header.question_count = section_len(self.questions.len());
        self.header.answer_count = section_len(self.answers.len());
        self.header.authority_count = section_len(self.authority.len());
        self.header.additional_count = section_len(self.additional.len());
    }

    /// Answer, authority and additional records, in wire order.
    pub fn records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authority.iter())
            .chain(self.additional.iter())
    }
}

fn section_len(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}
