//! Guess scoring: black and white peg computation against a secret code

/// Scores a guess against a secret, returning `(black, white, is_win)`.
///
/// Black pegs count digits that match in both value and position. White
/// pegs count digits present in the secret at a different position, after
/// black-peg consumption. Each secret digit can satisfy at most one peg;
/// ties between equal unconsumed secret digits are broken by lowest index.
///
/// Both arguments must be exactly [`shared::CODE_LENGTH`] ASCII digits.
/// Callers validate the shape (see [`shared::is_valid_guess`]); this
/// function does not re-validate.
pub fn score(secret: &str, guess: &str) -> (u8, u8, bool) {
    let secret = secret.as_bytes();
    let guess = guess.as_bytes();

    let mut black = 0u8;
    let mut white = 0u8;
    let mut secret_used = [false; shared::CODE_LENGTH];
    let mut guess_used = [false; shared::CODE_LENGTH];

    // Pass 1: exact matches consume both positions
    for i in 0..shared::CODE_LENGTH {
        if secret[i] == guess[i] {
            black += 1;
            secret_used[i] = true;
            guess_used[i] = true;
        }
    }

    // Pass 2: value-only matches against unconsumed secret digits
    for i in 0..shared::CODE_LENGTH {
        if guess_used[i] {
            continue;
        }
        for j in 0..shared::CODE_LENGTH {
            if !secret_used[j] && guess[i] == secret[j] {
                white += 1;
                secret_used[j] = true;
                break;
            }
        }
    }

    (black, white, black as usize == shared::CODE_LENGTH)
}
