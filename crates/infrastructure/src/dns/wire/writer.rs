use super::bits::BitField;
use super::name::{write_name, CompressionTable};
use super::{HEADER_SIZE, MAX_MESSAGE_SIZE};
use iterdns_domain::{DomainError, Header, Message, Question, RData, ResourceRecord};

/// Encodes `message` with name compression.
///
/// Section counts are taken from the section lengths, not from the header.
/// Fails instead of producing more than [`MAX_MESSAGE_SIZE`] bytes.
pub fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut writer = Writer {
        out: Vec::with_capacity(MAX_MESSAGE_SIZE),
        names: CompressionTable::new(),
    };

    writer.header(
        &message.header,
        [
            count(message.questions.len())?,
            count(message.answers.len())?,
            count(message.authority.len())?,
            count(message.additional.len())?,
        ],
    );

    for question in &message.questions {
        writer.question(question)?;
    }
    for record in message.records() {
        writer.record(record)?;
    }

    Ok(writer.out)
}

fn count(len: usize) -> Result<u16, DomainError> {
    u16::try_from(len).map_err(|_| DomainError::malformed("section has more than 65535 entries"))
}

struct Writer {
    out: Vec<u8>,
    names: CompressionTable,
}

impl Writer {
    fn header(&mut self, header: &Header, counts: [u16; 4]) {
        let mut high = (header.opcode.to_u8() & 0x0F) << 3;
        if header.is_response {
            high = high.set(7);
        }
        if header.authoritative {
            high = high.set(2);
        }
        if header.truncated {
            high = high.set(1);
        }
        if header.recursion_desired {
            high = high.set(0);
        }

        let mut low = header.response_code.to_u8() & 0x0F;
        if header.recursion_available {
            low = low.set(7);
        }

        self.out.push(header.id.read_octet(1));
        self.out.push(header.id.read_octet(0));
        self.out.push(high);
        self.out.push(low);
        for value in counts {
            self.out.push(value.read_octet(1));
            self.out.push(value.read_octet(0));
        }
        debug_assert_eq!(self.out.len(), HEADER_SIZE);
    }

    fn question(&mut self, question: &Question) -> Result<(), DomainError> {
        write_name(&mut self.out, &question.name, &mut self.names)?;
        self.out
            .extend_from_slice(&question.qtype.to_u16().to_be_bytes());
        self.out.extend_from_slice(&question.qclass.to_be_bytes());
        self.check_size()
    }

    fn record(&mut self, record: &ResourceRecord) -> Result<(), DomainError> {
        write_name(&mut self.out, &record.name, &mut self.names)?;
        self.out
            .extend_from_slice(&record.rtype.to_u16().to_be_bytes());
        self.out.extend_from_slice(&record.class.to_be_bytes());
        self.out.extend_from_slice(&record.ttl.to_be_bytes());

        let length_at = self.out.len();
        self.out.extend_from_slice(&[0, 0]);

        match &record.rdata {
            RData::A(addr) => self.out.extend_from_slice(&addr.octets()),
            RData::Aaaa(addr) => self.out.extend_from_slice(&addr.octets()),
            RData::Ns(name) | RData::Cname(name) => {
                write_name(&mut self.out, name, &mut self.names)?
            }
            RData::Opaque(bytes) => self.out.extend_from_slice(bytes),
        }

        let rdlength = u16::try_from(self.out.len() - length_at - 2)
            .map_err(|_| DomainError::malformed("rdata longer than 65535 bytes"))?;
        self.out[length_at..length_at + 2].copy_from_slice(&rdlength.to_be_bytes());
        self.check_size()
    }

    fn check_size(&self) -> Result<(), DomainError> {
        if self.out.len() > MAX_MESSAGE_SIZE {
            return Err(DomainError::malformed(format!(
                "message too large: {} bytes exceeds {}",
                self.out.len(),
                MAX_MESSAGE_SIZE
            )));
        }
        Ok(())
    }
}
