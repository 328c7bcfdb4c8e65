//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//


//! Fiberhome `EN` error codes

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tl1kit_codec::{Response, ResponseData};

/// Field carrying the error code in a denied response.
pub const ERROR_FIELD: &str = "EN";

/// `EN` value that is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown Fiberhome error code: {0:?}")]
pub struct UnknownErrorCode(pub String);

/// Error class, taken from the first letter of the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// `I`: the command carried bad input
    Input,
    /// `D`: the device refused or failed
    Device,
    /// `S`: the management system refused or failed
    System,
    /// `E`: unexpected exception in the management system
    Exception,
    /// `T`: test resources unavailable
    Test,
}

/// Error codes reported by Fiberhome network elements in the `EN` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// IRNE
    ResourceNotFound,
    /// IANE
    AlarmNotFound,
    /// IMP
    MissingParameter,
    /// IIPF
    InvalidParameterFormat,
    /// IIPE
    InputParameterError,
    /// DDNS
    DeviceNotSupported,
    /// DDOF
    DeviceOperationFailed,
    /// DDB
    DeviceBusy,
    /// SENS
    SystemNotSupported,
    /// SEOF
    SystemOperationFailed,
    /// EEEH
    SystemException,
    /// TUB
    UserBusy,
    /// TUT
    UserTesting,
    /// TTMB
    TestModuleBusy,
}

impl ErrorCode {
    /// Every code in the catalogue.
    pub const ALL: [ErrorCode; 14] = [
        ErrorCode::ResourceNotFound,
        ErrorCode::AlarmNotFound,
        ErrorCode::MissingParameter,
        ErrorCode::InvalidParameterFormat,
        ErrorCode::InputParameterError,
        ErrorCode::DeviceNotSupported,
        ErrorCode::DeviceOperationFailed,
        ErrorCode::DeviceBusy,
        ErrorCode::SystemNotSupported,
        ErrorCode::SystemOperationFailed,
        ErrorCode::SystemException,
        ErrorCode::UserBusy,
        ErrorCode::UserTesting,
        ErrorCode::TestModuleBusy,
    ];

    /// Wire form of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ResourceNotFound => "IRNE",
            ErrorCode::AlarmNotFound => "IANE",
            ErrorCode::MissingParameter => "IMP",
            ErrorCode::InvalidParameterFormat => "IIPF",
            ErrorCode::InputParameterError => "IIPE",
            ErrorCode::DeviceNotSupported => "DDNS",
            ErrorCode::DeviceOperationFailed => "DDOF",
            ErrorCode::DeviceBusy => "DDB",
            ErrorCode::SystemNotSupported => "SENS",
            ErrorCode::SystemOperationFailed => "SEOF",
            ErrorCode::SystemException => "EEEH",
            ErrorCode::UserBusy => "TUB",
            ErrorCode::UserTesting => "TUT",
            ErrorCode::TestModuleBusy => "TTMB",
        }
    }

    /// Human readable description.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::ResourceNotFound => "Resource does not exist",
            ErrorCode::AlarmNotFound => "The alarm does not exist",
            ErrorCode::MissingParameter => "Missing parameter",
            ErrorCode::InvalidParameterFormat => "Invalid parameter format",
            ErrorCode::InputParameterError => "Input parameter error",
            ErrorCode::DeviceNotSupported => "Device may not support this operation",
            ErrorCode::DeviceOperationFailed => "Device operation failed",
            ErrorCode::DeviceBusy => "Device is busy",
            ErrorCode::SystemNotSupported => "EMS may not support this operation",
            ErrorCode::SystemOperationFailed => "EMS operation failed",
            ErrorCode::SystemException => "EMS exception happens",
            ErrorCode::UserBusy => "User is busy",
            ErrorCode::UserTesting => "User is testing",
            ErrorCode::TestModuleBusy => "Test module is busy",
        }
    }

    /// Error class of the code.
    pub fn category(self) -> ErrorCategory {
        match self.as_str().as_bytes()[0] {
            b'I' => ErrorCategory::Input,
            b'D' => ErrorCategory::Device,
            b'S' => ErrorCategory::System,
            b'E' => ErrorCategory::Exception,
            _ => ErrorCategory::Test,
        }
    }

    /// Busy conditions that may clear if the command is retried later.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ErrorCode::DeviceBusy
                | ErrorCode::UserBusy
                | ErrorCode::UserTesting
                | ErrorCode::TestModuleBusy
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.description())
    }
}

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        ErrorCode::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == code)
            .ok_or_else(|| UnknownErrorCode(code.to_string()))
    }
}

/// Read the `EN` field of a response's flat record.
///
/// `None` when the response carries no record, no `EN` field, or a code that
/// is not in the catalogue (successful replies report `EN=0`).
pub fn error_code(response: &Response) -> Option<ErrorCode> {
    match response.result.as_ref()? {
        ResponseData::Record(record) => record.get(ERROR_FIELD)?.parse().ok(),
        ResponseData::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for code in ErrorCode::ALL {
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(
            "XYZ".parse::<ErrorCode>(),
            Err(UnknownErrorCode("XYZ".to_string()))
        );
        assert!("0".parse::<ErrorCode>().is_err());
    }

    #[test]
    fn test_categories() {
        assert_eq!(ErrorCode::MissingParameter.category(), ErrorCategory::Input);
        assert_eq!(ErrorCode::DeviceBusy.category(), ErrorCategory::Device);
        assert_eq!(ErrorCode::SystemOperationFailed.category(), ErrorCategory::System);
        assert_eq!(ErrorCode::SystemException.category(), ErrorCategory::Exception);
        assert_eq!(ErrorCode::TestModuleBusy.category(), ErrorCategory::Test);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ErrorCode::ResourceNotFound.to_string(),
            "IRNE (Resource does not exist)"
        );
        assert!(ErrorCode::UserBusy.is_transient());
        assert!(!ErrorCode::InvalidParameterFormat.is_transient());
    }
}
