//! Minimal Solidity ABI codec for the marketplace contracts.
//!
//! Covers the parameter kinds those contracts use: `address`, `uint256`
//! (and `uint8`, which shares the word layout), `bool`, `bytes32`,
//! `string`, dynamic arrays and tuples. Calls are `selector ++ encode(args)`;
//! return data is `decode(outputs, data)`.

use primitive_types::U256;
use sha3::{Digest, Keccak256};
use thiserror::Error;

const WORD: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("invalid address '{0}'")]
    InvalidAddress(String),
    #[error("return data too short: {needed} bytes needed at offset {offset}, {len} available")]
    OutOfBounds { offset: usize, needed: usize, len: usize },
    #[error("{0} does not fit the target type")]
    Overflow(&'static str),
    #[error("string is not valid utf-8")]
    InvalidUtf8,
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: &'static str, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Address,
    Uint,
    Bool,
    FixedBytes32,
    String,
    Array(Box<ParamType>),
    Tuple(Vec<ParamType>),
}

impl ParamType {
    pub fn array(inner: ParamType) -> Self {
        Self::Array(Box::new(inner))
    }

    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::String | Self::Array(_) => true,
            Self::Tuple(items) => items.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    fn head_size(&self) -> usize {
        match self {
            Self::Tuple(items) if !self.is_dynamic() => items.iter().map(ParamType::head_size).sum(),
            _ => WORD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address([u8; 20]),
    Uint(U256),
    Bool(bool),
    FixedBytes([u8; 32]),
    String(String),
    Array(Vec<Token>),
    Tuple(Vec<Token>),
}

impl Token {
    pub fn address(address: &str) -> Result<Self, AbiError> {
        parse_address(address).map(Self::Address)
    }

    pub fn uint(value: impl Into<U256>) -> Self {
        Self::Uint(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn strings(values: &[String]) -> Self {
        Self::Array(values.iter().cloned().map(Self::String).collect())
    }

    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::String(_) | Self::Array(_) => true,
            Self::Tuple(items) => items.iter().any(Token::is_dynamic),
            _ => false,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Uint(_) => "uint",
            Self::Bool(_) => "bool",
            Self::FixedBytes(_) => "bytes32",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
        }
    }

    fn mismatch(self, expected: &'static str) -> AbiError {
        AbiError::UnexpectedToken {
            expected,
            found: self.kind().to_owned(),
        }
    }

    pub fn into_address(self) -> Result<String, AbiError> {
        match self {
            Self::Address(bytes) => Ok(format_address(&bytes)),
            other => Err(other.mismatch("address")),
        }
    }

    pub fn into_uint(self) -> Result<U256, AbiError> {
        match self {
            Self::Uint(value) => Ok(value),
            other => Err(other.mismatch("uint")),
        }
    }

    pub fn into_u64(self) -> Result<u64, AbiError> {
        let value = self.into_uint()?;
        if value > U256::from(u64::MAX) {
            return Err(AbiError::Overflow("uint256"));
        }
        Ok(value.low_u64())
    }

    pub fn into_u8(self) -> Result<u8, AbiError> {
        let value = self.into_uint()?;
        if value > U256::from(u8::MAX) {
            return Err(AbiError::Overflow("uint8"));
        }
        Ok(value.low_u64() as u8)
    }

    pub fn into_bool(self) -> Result<bool, AbiError> {
        match self {
            Self::Bool(value) => Ok(value),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn into_string(self) -> Result<String, AbiError> {
        match self {
            Self::String(value) => Ok(value),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn into_array(self) -> Result<Vec<Token>, AbiError> {
        match self {
            Self::Array(items) => Ok(items),
            other => Err(other.mismatch("array")),
        }
    }

    pub fn into_tuple(self) -> Result<Vec<Token>, AbiError> {
        match self {
            Self::Tuple(items) => Ok(items),
            other => Err(other.mismatch("tuple")),
        }
    }

    pub fn into_strings(self) -> Result<Vec<String>, AbiError> {
        self.into_array()?.into_iter().map(Token::into_string).collect()
    }
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// First four bytes of the keccak-256 of a canonical signature such as
/// `transfer(address,uint256)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut data = selector(signature).to_vec();
    data.extend(encode(args));
    data
}

/// Head/tail encoding of a parameter list.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len: usize = tokens.iter().map(head_size).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        let body = encode_token(token);
        if token.is_dynamic() {
            head.extend(usize_word(head_len + tail.len()));
            tail.extend(body);
        } else {
            head.extend(body);
        }
    }
    head.extend(tail);
    head
}

fn head_size(token: &Token) -> usize {
    match token {
        Token::Tuple(items) if !token.is_dynamic() => items.iter().map(head_size).sum(),
        _ => WORD,
    }
}

fn encode_token(token: &Token) -> Vec<u8> {
    match token {
        Token::Address(bytes) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(bytes);
            word.to_vec()
        }
        Token::Uint(value) => uint_word(*value).to_vec(),
        Token::Bool(value) => usize_word(usize::from(*value)).to_vec(),
        Token::FixedBytes(bytes) => bytes.to_vec(),
        Token::String(value) => {
            let bytes = value.as_bytes();
            let mut out = usize_word(bytes.len()).to_vec();
            out.extend_from_slice(bytes);
            out.resize(WORD + padded_len(bytes.len()), 0);
            out
        }
        Token::Array(items) => {
            let mut out = usize_word(items.len()).to_vec();
            out.extend(encode(items));
            out
        }
        Token::Tuple(items) => encode(items),
    }
}

fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn usize_word(value: usize) -> [u8; WORD] {
    uint_word(U256::from(value))
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    decode_params(types, data, 0)
}

/// Decodes a single return value.
pub fn decode_one(ty: ParamType, data: &[u8]) -> Result<Token, AbiError> {
    let mut tokens = decode(std::slice::from_ref(&ty), data)?;
    Ok(tokens.remove(0))
}

fn decode_params(types: &[ParamType], data: &[u8], base: usize) -> Result<Vec<Token>, AbiError> {
    let mut cursor = base;
    let mut tokens = Vec::with_capacity(types.len());
    for ty in types {
        if ty.is_dynamic() {
            let offset = read_usize(data, cursor)?;
            let at = base
                .checked_add(offset)
                .ok_or(AbiError::Overflow("offset"))?;
            tokens.push(decode_at(ty, data, at)?);
        } else {
            tokens.push(decode_at(ty, data, cursor)?);
        }
        cursor += ty.head_size();
    }
    Ok(tokens)
}

fn decode_at(ty: &ParamType, data: &[u8], at: usize) -> Result<Token, AbiError> {
    match ty {
        ParamType::Address => {
            let word = read_word(data, at)?;
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&word[12..]);
            Ok(Token::Address(bytes))
        }
        ParamType::Uint => Ok(Token::Uint(U256::from_big_endian(read_word(data, at)?))),
        ParamType::Bool => Ok(Token::Bool(read_word(data, at)?[WORD - 1] != 0)),
        ParamType::FixedBytes32 => {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(read_word(data, at)?);
            Ok(Token::FixedBytes(bytes))
        }
        ParamType::String => {
            let len = read_usize(data, at)?;
            let bytes = read_slice(data, at + WORD, len)?;
            String::from_utf8(bytes.to_vec())
                .map(Token::String)
                .map_err(|_| AbiError::InvalidUtf8)
        }
        ParamType::Array(inner) => {
            let len = read_usize(data, at)?;
            // Every element occupies at least one head word.
            let needed = len.checked_mul(WORD).ok_or(AbiError::Overflow("array length"))?;
            read_slice(data, at + WORD, needed)?;
            let types = vec![inner.as_ref().clone(); len];
            decode_params(&types, data, at + WORD).map(Token::Array)
        }
        ParamType::Tuple(items) => decode_params(items, data, at).map(Token::Tuple),
    }
}

fn read_slice(data: &[u8], offset: usize, needed: usize) -> Result<&[u8], AbiError> {
    offset
        .checked_add(needed)
        .and_then(|end| data.get(offset..end))
        .ok_or(AbiError::OutOfBounds {
            offset,
            needed,
            len: data.len(),
        })
}

fn read_word(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    read_slice(data, offset, WORD)
}

fn read_usize(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let value = U256::from_big_endian(read_word(data, offset)?);
    if value > U256::from(usize::MAX as u64) {
        return Err(AbiError::Overflow("length"));
    }
    Ok(value.low_u64() as usize)
}

pub fn parse_address(address: &str) -> Result<[u8; 20], AbiError> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| AbiError::InvalidAddress(address.to_owned()))?;
    Ok(bytes)
}

/// Lowercase `0x`-prefixed hex.
pub fn format_address(bytes: &[u8; 20]) -> String {
    format!("0x{}", hex::encode(bytes))
}
