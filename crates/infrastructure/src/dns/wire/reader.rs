use super::bits::{read_nybble, BitField};
use super::name::read_name;
use super::HEADER_SIZE;
use iterdns_domain::{
    DomainError, Header, Message, OpCode, Question, RData, RecordType, ResourceRecord,
    ResponseCode,
};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Decodes a complete DNS message.
///
/// Exactly the declared number of entries is read for every section; bytes
/// after the last record are ignored.
pub fn deserialize(bytes: &[u8]) -> Result<Message, DomainError> {
    let mut reader = Reader::new(bytes);
    let header = reader.header()?;

    let questions = (0..header.question_count)
        .map(|_| reader.question())
        .collect::<Result<Vec<_>, _>>()?;
    let answers = reader.records(header.answer_count)?;
    let authority = reader.records(header.authority_count)?;
    let additional = reader.records(header.additional_count)?;

    Ok(Message {
        header,
        questions,
        answers,
        authority,
        additional,
    })
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], DomainError> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + len)
            .ok_or_else(|| DomainError::malformed(format!("truncated {}", what)))?;
        self.pos += len;
        Ok(bytes)
    }

    fn u16(&mut self, what: &str) -> Result<u16, DomainError> {
        let bytes = self.take(2, what)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn i32(&mut self, what: &str) -> Result<i32, DomainError> {
        let bytes = self.take(4, what)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn name(&mut self) -> Result<String, DomainError> {
        read_name(self.buf, &mut self.pos)
    }

    fn header(&mut self) -> Result<Header, DomainError> {
        if self.buf.len() < HEADER_SIZE {
            return Err(DomainError::malformed(format!(
                "header needs {} bytes, got {}",
                HEADER_SIZE,
                self.buf.len()
            )));
        }

        let id = self.u16("id")?;
        let flags = self.take(2, "flags")?;
        let (high, low) = (flags[0], flags[1]);

        Ok(Header {
            id,
            is_response: high.is_set(7),
            opcode: OpCode::from_u8(read_nybble(high, 6)),
            authoritative: high.is_set(2),
            truncated: high.is_set(1),
            recursion_desired: high.is_set(0),
            recursion_available: low.is_set(7),
            response_code: ResponseCode::from_u8(read_nybble(low, 3)),
            question_count: self.u16("question count")?,
            answer_count: self.u16("answer count")?,
            authority_count: self.u16("authority count")?,
            additional_count: self.u16("additional count")?,
        })
    }

    fn question(&mut self) -> Result<Question, DomainError> {
        let name = self.name()?;
        let qtype = RecordType::from_u16(self.u16("question type")?);
        let qclass = self.u16("question class")?;
        Ok(Question {
            name,
            qtype,
            qclass,
        })
    }

    fn records(&mut self, count: u16) -> Result<Vec<ResourceRecord>, DomainError> {
        (0..count).map(|_| self.record()).collect()
    }

    fn record(&mut self) -> Result<ResourceRecord, DomainError> {
        let name = self.name()?;
        let rtype = RecordType::from_u16(self.u16("record type")?);
        let class = self.u16("record class")?;
        let ttl = self.i32("ttl")?;
        let rdlength = usize::from(self.u16("rdlength")?);

        let start = self.pos;
        let rdata = self.take(rdlength, "rdata")?;
        let rdata = match rtype {
            RecordType::A => {
                let octets: [u8; 4] = rdata.try_into().map_err(|_| {
                    DomainError::malformed(format!("A record with {} byte rdata", rdlength))
                })?;
                RData::A(Ipv4Addr::from(octets))
            }
            RecordType::AAAA => {
                let octets: [u8; 16] = rdata.try_into().map_err(|_| {
                    DomainError::malformed(format!("AAAA record with {} byte rdata", rdlength))
                })?;
                RData::Aaaa(Ipv6Addr::from(octets))
            }
            RecordType::NS | RecordType::CNAME => {
                let mut cursor = start;
                let target = read_name(self.buf, &mut cursor)?;
                if cursor > start + rdlength {
                    return Err(DomainError::malformed(format!(
                        "{} rdata name overruns rdlength {}",
                        rtype, rdlength
                    )));
                }
                if rtype == RecordType::NS {
                    RData::Ns(target)
                } else {
                    RData::Cname(target)
                }
            }
            _ => RData::Opaque(rdata.to_vec()),
        };

        Ok(ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            rdata,
        })
    }
}
