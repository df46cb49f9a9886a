// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Key definitions.
//!
//! Keys are identified by their DirectInput scan code, which is what the
//! squad-command interface reads. The same numbering is used by the Linux
//! evdev layer for all keys defined here, so ydotool receives it unchanged.

/// A physical key, by DirectInput / PC set-1 scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum KeyCode {
    Escape = 0x01,
    One = 0x02,
    Two = 0x03,
    Three = 0x04,
    Four = 0x05,
    Five = 0x06,
    Six = 0x07,
    Seven = 0x08,
    Eight = 0x09,
    Nine = 0x0A,
    Zero = 0x0B,
    Minus = 0x0C,
    Equals = 0x0D,
    Backspace = 0x0E,
    Tab = 0x0F,
    Q = 0x10,
    W = 0x11,
    E = 0x12,
    R = 0x13,
    T = 0x14,
    Y = 0x15,
    U = 0x16,
    I = 0x17,
    O = 0x18,
    P = 0x19,
    LeftBracket = 0x1A,
    RightBracket = 0x1B,
    Enter = 0x1C,
    LeftControl = 0x1D,
    A = 0x1E,
    S = 0x1F,
    D = 0x20,
    F = 0x21,
    G = 0x22,
    H = 0x23,
    J = 0x24,
    K = 0x25,
    L = 0x26,
    Semicolon = 0x27,
    Apostrophe = 0x28,
    Grave = 0x29,
    LeftShift = 0x2A,
    Backslash = 0x2B,
    Z = 0x2C,
    X = 0x2D,
    C = 0x2E,
    V = 0x2F,
    B = 0x30,
    N = 0x31,
    M = 0x32,
    Comma = 0x33,
    Period = 0x34,
    Slash = 0x35,
    LeftAlt = 0x38,
    Space = 0x39,
    CapsLock = 0x3A,
    F1 = 0x3B,
    F2 = 0x3C,
    F3 = 0x3D,
    F4 = 0x3E,
    F5 = 0x3F,
    F6 = 0x40,
    F7 = 0x41,
    F8 = 0x42,
    F9 = 0x43,
    F10 = 0x44,
    F11 = 0x57,
    F12 = 0x58,
}

impl KeyCode {
    /// DirectInput scan code.
    pub fn scan_code(self) -> u16 {
        self as u16
    }

    /// Get the enigo key.
    #[cfg(feature = "x11")]
    pub fn to_enigo(self) -> enigo::Key {
        use enigo::Key as EKey;
        match self {
            KeyCode::Escape => EKey::Escape,
            KeyCode::Backspace => EKey::Backspace,
            KeyCode::Tab => EKey::Tab,
            KeyCode::Enter => EKey::Return,
            KeyCode::LeftControl => EKey::Control,
            KeyCode::LeftShift => EKey::Shift,
            KeyCode::LeftAlt => EKey::Alt,
            KeyCode::Space => EKey::Space,
            KeyCode::CapsLock => EKey::CapsLock,
            KeyCode::F1 => EKey::F1,
            KeyCode::F2 => EKey::F2,
            KeyCode::F3 => EKey::F3,
            KeyCode::F4 => EKey::F4,
            KeyCode::F5 => EKey::F5,
            KeyCode::F6 => EKey::F6,
            KeyCode::F7 => EKey::F7,
            KeyCode::F8 => EKey::F8,
            KeyCode::F9 => EKey::F9,
            KeyCode::F10 => EKey::F10,
            KeyCode::F11 => EKey::F11,
            KeyCode::F12 => EKey::F12,
            other => EKey::Unicode(other.as_char().unwrap_or(' ')),
        }
    }

    /// Character produced by printable keys on a US layout.
    pub fn as_char(self) -> Option<char> {
        let c = match self {
            KeyCode::One => '1',
            KeyCode::Two => '2',
            KeyCode::Three => '3',
            KeyCode::Four => '4',
            KeyCode::Five => '5',
            KeyCode::Six => '6',
            KeyCode::Seven => '7',
            KeyCode::Eight => '8',
            KeyCode::Nine => '9',
            KeyCode::Zero => '0',
            KeyCode::Minus => '-',
            KeyCode::Equals => '=',
            KeyCode::Q => 'q',
            KeyCode::W => 'w',
            KeyCode::E => 'e',
            KeyCode::R => 'r',
            KeyCode::T => 't',
            KeyCode::Y => 'y',
            KeyCode::U => 'u',
            KeyCode::I => 'i',
            KeyCode::O => 'o',
            KeyCode::P => 'p',
            KeyCode::LeftBracket => '[',
            KeyCode::RightBracket => ']',
            KeyCode::A => 'a',
            KeyCode::S => 's',
            KeyCode::D => 'd',
            KeyCode::F => 'f',
            KeyCode::G => 'g',
            KeyCode::H => 'h',
            KeyCode::J => 'j',
            KeyCode::K => 'k',
            KeyCode::L => 'l',
            KeyCode::Semicolon => ';',
            KeyCode::Apostrophe => '\'',
            KeyCode::Grave => '`',
            KeyCode::Backslash => '\\',
            KeyCode::Z => 'z',
            KeyCode::X => 'x',
            KeyCode::C => 'c',
            KeyCode::V => 'v',
            KeyCode::B => 'b',
            KeyCode::N => 'n',
            KeyCode::M => 'm',
            KeyCode::Comma => ',',
            KeyCode::Period => '.',
            KeyCode::Slash => '/',
            KeyCode::Space => ' ',
            _ => return None,
        };
        Some(c)
    }

    /// Get the ydotool (evdev) key code.
    pub fn to_ydotool(self) -> u16 {
        self.scan_code()
    }
}
