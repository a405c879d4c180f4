//! SICP 3.5절: 스트림 (Streams)
//!
//! 이 절은 `sicp_stream::Stream`으로 지연 평가와 무한 수열을 보여준다
//! (This section demonstrates lazy evaluation and infinite sequences using `sicp_stream::Stream`).
//! Scheme의 스트림은 `delay`와 `force`로 꼬리를 미루고, 한 번 계산한 꼬리는 기억한다.
//! 러스트 Iterator와 달리 `Stream`은 공유 가능한 값이므로 스트림이 자기 자신을 참조할 수 있다
//! (Scheme streams delay their tails with `delay`/`force` and memoize them. Unlike a Rust
//! Iterator, a `Stream` is a shareable value, so a stream can be defined in terms of itself).
//!
//! 핵심 매핑 (Key mappings):
//! - `cons-stream` → `Stream::new` / `Stream::cyclic` (자기참조 (self-reference))
//! - `stream-car` → `Stream::head`
//! - `stream-cdr` → `Stream::tail` (메모이즈된 꼬리 (memoized tail))
//! - `stream-ref` → `Stream::at`
//! - `stream-map` → `Stream::map` / `Stream::zip_with`
//! - `stream-filter` → `Stream::select`
//! - `(delay <exp>)` → `sicp_stream::Delayed`

use std::ops::Add;
use std::rc::Rc;

use num_bigint::BigUint;
use sicp_stream::{Deferred, Delayed, Result, Stream};

// =============================================================================
// 3.5.1절: 스트림은 지연된 리스트 (Streams Are Delayed Lists)
// =============================================================================

/// 필요한 만큼만 계산하는 구간 스트림을 보여준다
/// (Demonstrates interval streams that compute only what is needed).
///
/// Scheme에서 `(stream-car (stream-cdr (stream-filter prime? (stream-enumerate-interval 10000 1000000))))`
/// 는 두 번째 소수를 찾는 순간 멈춘다
/// (stops as soon as the second prime is found).
pub mod delayed_lists {
    use std::cmp::Ordering;

    use sicp_stream::{Result, Stream};

    use super::is_prime;

    /// [low, high] 구간의 정수 스트림 (Finite stream of the integers in [low, high]).
    pub fn enumerate_interval(low: u64, high: u64) -> Stream<u64> {
        match low.cmp(&high) {
            Ordering::Greater => Stream::empty(),
            Ordering::Equal => Stream::singleton(low),
            Ordering::Less => Stream::new(low, move || enumerate_interval(low + 1, high)),
        }
    }

    /// 구간에서 두 번째 소수를 찾는다 (Finds the second prime in a range).
    ///
    /// 구간이 아무리 커도 두 번째 소수까지만 꼬리를 강제한다
    /// (However large the range, only the tails up to the second prime are forced).
    pub fn second_prime(low: u64, high: u64) -> Result<u64> {
        enumerate_interval(low, high)
            .select(|&n| is_prime(n))
            .at(1)
            .copied()
    }

    /// 구간 안의 소수를 모두 더한다 (Sums every prime in a range).
    pub fn sum_primes(low: u64, high: u64) -> u64 {
        enumerate_interval(low, high)
            .select(|&n| is_prime(n))
            .reduce(0, |acc, n| acc + n)
    }

    /// 스트림 컴비네이터 시연 (select, map, take, reduce)
    /// (Demonstrates stream combinators (select, map, take, reduce)).
    pub fn sum_of_squares_of_odd_numbers(n: usize) -> u64 {
        super::integers_starting_from(0)
            .select(|x| x % 2 == 1) // 홀수 필터 (Filter odd numbers)
            .map(|x| x * x) // 제곱 (Square them)
            .take(n) // 처음 n개 (Take first n)
            .reduce(0, |acc, x| acc + x) // 합산 (Sum them up)
    }
}

// =============================================================================
// 3.5.2절: 무한 스트림 (Infinite Streams)
// =============================================================================

/// n에서 시작하는 정수 무한 스트림
/// (Infinite stream of integers starting from n).
pub fn integers_starting_from(n: u64) -> Stream<u64> {
    Stream::new(n, move || integers_starting_from(n + 1))
}

/// 7로 나누어떨어지지 않는 정수 (Integers not divisible by 7).
pub fn no_sevens() -> Stream<u64> {
    integers_starting_from(1).select(|i| i % 7 != 0)
}

/// 피보나치 수열 무한 스트림 (Infinite stream of Fibonacci numbers).
///
/// 원소 타입은 호출자가 고른다. `u64`는 94번째 항에서 넘치므로 긴 접두부에는 `BigUint`를 쓴다
/// (The caller picks the element type; `u64` overflows at index 94, so long prefixes want `BigUint`).
pub fn fibgen<T>(a: T, b: T) -> Stream<T>
where
    T: Add<Output = T> + Clone + 'static,
{
    let current = a.clone();
    Stream::new(a, move || {
        let next = current + b.clone();
        fibgen(b, next)
    })
}

/// 에라토스테네스의 체 - 소수 무한 스트림
/// (Sieve of Eratosthenes - infinite stream of prime numbers).
///
/// 찾은 소수마다 그 배수를 거르는 `select`가 한 겹씩 쌓인다
/// (Each prime found stacks one more `select` that filters out its multiples).
pub fn sieve(stream: &Stream<u64>) -> Stream<u64> {
    let Ok(&prime) = stream.head() else {
        return Stream::empty();
    };
    let stream = stream.clone();
    Stream::new(prime, move || {
        sieve(&stream.drop(1).select(move |x| x % prime != 0))
    })
}

pub fn prime_sieve() -> Stream<u64> {
    sieve(&integers_starting_from(2))
}

// =============================================================================
// 암시적 스트림 정의 (Implicit Stream Definitions)
// =============================================================================

/// 스킴 (Scheme): (define ones (cons-stream 1 ones))
///
/// 꼬리가 스트림 자신이므로 노드 하나로 무한 스트림을 표현한다
/// (The tail is the stream itself, so one node represents the whole infinite stream).
pub fn ones() -> Stream<u64> {
    Stream::cyclic(1, |ones| ones)
}

/// 스킴 (Scheme): (define integers (cons-stream 1 (add-streams ones integers)))
pub fn integers() -> Stream<u64> {
    Stream::cyclic(1, |integers| Stream::add([ones(), integers]))
}

/// 항이 지수적으로 커지므로 원소는 `BigUint`다
/// (The terms grow exponentially, so the elements are `BigUint`).
///
/// 스킴 (Scheme):
/// ```scheme
/// (define fibs
///   (cons-stream 0
///                (cons-stream 1
///                             (add-streams (stream-cdr fibs) fibs))))
/// ```
pub fn fibs() -> Stream<BigUint> {
    Stream::cyclic(BigUint::from(0u32), |fibs| {
        Stream::new(BigUint::from(1u32), move || {
            Stream::add([fibs.drop(1), fibs])
        })
    })
}

/// 이전 요소를 두 배로 하는 스트림: 1, 2, 4, 8, 16, ...
/// (Stream that doubles each previous element: 1, 2, 4, 8, 16, ...)
/// 스킴 (Scheme): (define double (cons-stream 1 (scale-stream double 2)))
pub fn doubles() -> Stream<BigUint> {
    Stream::cyclic(BigUint::from(1u32), |double| double.scale(BigUint::from(2u32)))
}

/// 연습문제 3.54: 계승 스트림 (Exercise 3.54: stream of factorials).
/// 스킴 (Scheme): (define factorials (cons-stream 1 (mul-streams factorials (integers-starting-from 2))))
pub fn factorials() -> Stream<BigUint> {
    Stream::cyclic(BigUint::from(1u32), |factorials| {
        let factors = integers_starting_from(2).map(|&n| BigUint::from(n));
        Stream::mul([factorials, factors])
    })
}

/// 이미 찾은 소수로만 나눠보는 소수 스트림
/// (Primes by trial division against the primes found so far).
///
/// `prime?`이 `primes` 자신을 읽으므로 가장 까다로운 자기참조 형태다. 후보 n을 검사할 때는
/// p² > n인 소수에서 멈추므로 아직 계산 중인 꼬리에는 닿지 않는다
/// (`prime?` reads `primes` itself, the hardest self-reference pattern. Testing a candidate n
/// stops at the first p with p² > n, so it never reaches the tail still being computed).
pub fn primes() -> Stream<u64> {
    Stream::cyclic(2, |primes| {
        integers_starting_from(3).select(move |&n| is_prime_against(&primes, n))
    })
}

/// `primes`의 이미 계산된 앞부분으로 n을 판정한다
/// (Tests n against the already computed prefix of `primes`).
pub fn is_prime_against(primes: &Stream<u64>, n: u64) -> bool {
    for &p in primes {
        if p * p > n {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }
    true
}

thread_local! {
    // 호출 사이에 공유되는 소수 스트림 (Prime stream shared across calls).
    static PRIMES: Stream<u64> = primes();
}

/// 소수 판정 (Primality test) backed by a memoized, shared `primes` stream.
pub fn is_prime(n: u64) -> bool {
    n >= 2 && PRIMES.with(|primes| is_prime_against(primes, n))
}

pub fn prime_enumerate_interval(low: u64, high: u64) -> Stream<u64> {
    delayed_lists::enumerate_interval(low, high).select(|&n| is_prime(n))
}

// =============================================================================
// 3.5.3절: 스트림 패러다임 활용 (Exploiting the Stream Paradigm)
// =============================================================================

pub fn sqrt_improve(guess: f64, x: f64) -> f64 {
    (guess + x / guess) / 2.0
}

/// 스트림을 이용한 반복적 개선 - 제곱근 근사
/// (Iterative improvement using streams - square root approximation).
///
/// 상태 변수 대신 추측값의 스트림이 자기 자신을 개선한다
/// (Instead of a state variable, the stream of guesses improves on itself).
///
/// 자기참조 스트림이므로 버린 뒤에도 마지막 두 노드는 남는다 (`Stream::cyclic` 참고)
/// (Being self-referential, its last two nodes outlive it; see `Stream::cyclic`).
pub fn sqrt_stream(x: f64) -> Stream<f64> {
    Stream::cyclic(1.0, move |guesses| {
        guesses.map(move |&guess| sqrt_improve(guess, x))
    })
}

/// 교대 급수로 파이 근사: 1/n, -1/(n+2), 1/(n+4), ...
/// (Alternating series for pi: 1/n, -1/(n+2), 1/(n+4), ...)
pub fn pi_summands(n: f64) -> Stream<f64> {
    Stream::new(1.0 / n, move || pi_summands(n + 2.0).map(|x| -x))
}

pub fn pi_stream() -> Stream<f64> {
    pi_summands(1.0).partial_sums().scale(4.0)
}

/// 수열 가속을 위한 오일러 변환 (Euler transform for sequence acceleration).
///
/// 분모가 0이면 IEEE 규칙대로 무한대나 NaN이 나온다
/// (A zero denominator yields infinity or NaN under IEEE rules).
pub fn euler_transform(s: &Stream<f64>) -> Stream<f64> {
    let (Ok(&s0), Ok(&s1), Ok(&s2)) = (s.at(0), s.at(1), s.at(2)) else {
        return Stream::empty();
    };
    let rest = s.drop(1);
    Stream::new(
        s2 - (s2 - s1).powi(2) / (s0 - 2.0 * s1 + s2),
        move || euler_transform(&rest),
    )
}

/// 스트림의 스트림: s, T(s), T(T(s)), ... (Tableau of repeatedly transformed streams).
pub fn make_tableau<T, F>(s: Stream<T>, transform: F) -> Stream<Stream<T>>
where
    T: 'static,
    F: Fn(&Stream<T>) -> Stream<T> + 'static,
{
    tableau_with(s, Rc::new(transform))
}

fn tableau_with<T: 'static>(
    s: Stream<T>,
    transform: Rc<dyn Fn(&Stream<T>) -> Stream<T>>,
) -> Stream<Stream<T>> {
    let current = s.clone();
    Stream::new(s, move || {
        let next = transform(&current);
        tableau_with(next, transform)
    })
}

/// 타블로의 각 행의 첫 항 (The first term of each row of the tableau).
///
/// n번째 항은 변환을 n번 적용한 스트림의 머리다. 변환 결과가 빈 스트림이 되면 끝난다
/// (The nth term is the head of the stream transformed n times; it ends at the first empty row).
pub fn accelerated_sequence<T, F>(s: Stream<T>, transform: F) -> Stream<T>
where
    T: Clone + 'static,
    F: Fn(&Stream<T>) -> Stream<T> + 'static,
{
    leading_terms(&make_tableau(s, transform))
}

fn leading_terms<T: Clone + 'static>(tableau: &Stream<Stream<T>>) -> Stream<T> {
    let Ok(first) = tableau.head().and_then(Stream::head) else {
        return Stream::empty();
    };
    let tableau = tableau.clone();
    Stream::new(first.clone(), move || leading_terms(&tableau.drop(1)))
}

/// 스트림 제한 - 연속 요소가 허용 오차 안에 들어올 때를 찾는다
/// (Stream limit - finds when consecutive elements are within tolerance).
pub fn stream_limit(s: &Stream<f64>, tolerance: f64) -> Option<f64> {
    let mut terms = s.iter().copied();
    let mut prev = terms.next()?;

    for current in terms {
        if (current - prev).abs() < tolerance {
            return Some(current);
        }
        prev = current;
    }

    None
}

pub fn sqrt(x: f64, tolerance: f64) -> Option<f64> {
    stream_limit(&sqrt_stream(x), tolerance)
}

// =============================================================================
// 쌍의 무한 스트림 (Infinite Streams of Pairs)
// =============================================================================

/// i <= j를 만족하는 모든 (S_i, T_j) 쌍의 스트림
/// (Stream of all pairs (S_i, T_j) with i <= j).
///
/// 첫 행의 나머지와 남은 쌍들을 `interleave`로 섞는다. `interleave`가 매 단계 인자를 바꾸므로
/// 순서는 (1,1), (1,2), (2,2), (1,3), (2,3), ... 이다
/// (The rest of the first row is interleaved with the remaining pairs. Because `interleave`
/// swaps its arguments at every step, the order is (1,1), (1,2), (2,2), (1,3), (2,3), ...).
pub fn pairs<T: Clone + 'static>(s: &Stream<T>, t: &Stream<T>) -> Stream<(T, T)> {
    let (Ok(s0), Ok(t0)) = (s.head(), t.head()) else {
        return Stream::empty();
    };
    let first = s0.clone();
    let (s, t) = (s.clone(), t.clone());
    Stream::new((s0.clone(), t0.clone()), move || {
        let row = t.drop(1).map(move |x| (first.clone(), x.clone()));
        Stream::interleave(&row, &pairs(&s.drop(1), &t.drop(1)))
    })
}

// =============================================================================
// 3.5.4절: 스트림과 지연 평가 (Streams and Delayed Evaluation)
// =============================================================================

/// 신호 적분기 - 시간에 따라 합을 누적 (Signal integrator - accumulates sum over time).
///
/// 피적분 스트림은 지연된 채로 받아서 꼬리가 처음 필요할 때 강제한다. 그래야 피적분 스트림이
/// 이 적분의 결과에 의존할 수 있다
/// (The integrand arrives delayed and is forced only when the tail is first needed, so that
/// the integrand may itself depend on this integral's output).
///
/// 스킴 (Scheme):
/// ```scheme
/// (define (integral delayed-integrand initial-value dt)
///   (define int
///     (cons-stream initial-value
///                  (let ((integrand (force delayed-integrand)))
///                    (add-streams (scale-stream integrand dt) int))))
///   int)
/// ```
pub fn integral(integrand: Delayed<f64>, initial_value: f64, dt: f64) -> Stream<f64> {
    Stream::cyclic(initial_value, move |int| {
        Stream::add([integrand.force().scale(dt), int])
    })
}

/// 미분방정식 dy/dt = f(y)를 초기 조건 y(0) = y0로 푼다
/// (Solve differential equation dy/dt = f(y) with initial condition y(0) = y0).
///
/// `y`는 `dy`에, `dy`는 `y`에 의존한다. `Deferred` 자리에 `y`를 나중에 묶어 순환을 끊는다
/// (`y` depends on `dy` and `dy` on `y`; binding `y` into a `Deferred` slot afterwards breaks the cycle).
///
/// 계산 순환은 끊기지만 참조 순환은 남아서 해의 마지막 몇 노드는 해제되지 않는다
/// (The evaluation cycle is broken, the reference cycle is not: the last few nodes of the
/// solution are never freed).
pub fn solve<F>(f: F, y0: f64, dt: f64) -> Result<Stream<f64>>
where
    F: Fn(f64) -> f64 + 'static,
{
    let y: Deferred<f64> = Deferred::new();
    let dy = {
        let y = y.clone();
        Delayed::new(move || y.force().map(move |&value| f(value)))
    };
    let solution = integral(dy, y0, dt);
    y.bind(solution.clone())?;
    Ok(solution)
}

/// 연습문제 3.78: 2계 선형 미분방정식 d²y/dt² = a·dy/dt + b·y
/// (Exercise 3.78: second-order linear equation d²y/dt² = a·dy/dt + b·y).
pub fn solve_2nd(a: f64, b: f64, dt: f64, y0: f64, dy0: f64) -> Result<Stream<f64>> {
    let dy_slot: Deferred<f64> = Deferred::new();
    let ddy_slot: Deferred<f64> = Deferred::new();
    let y = integral(dy_slot.delayed(), y0, dt);
    let dy = integral(ddy_slot.delayed(), dy0, dt);
    let ddy = Stream::add([dy.scale(a), y.scale(b)]);
    dy_slot.bind(dy)?;
    ddy_slot.bind(ddy)?;
    Ok(y)
}

// =============================================================================
// 3.5.5절: 함수형 프로그램의 모듈성 (Modularity of Functional Programs)
// =============================================================================

/// 스트림을 사용하는 몬테카를로 추정 (Monte Carlo estimation using streams).
///
/// 난수 생성기 상태는 각 노드의 꼬리 클로저가 소유하므로 같은 시드는 항상 같은 스트림을 만든다
/// (Each node's tail closure owns the generator state, so a seed always yields the same stream).
pub mod monte_carlo {
    use num_integer::Integer;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use sicp_stream::Stream;

    /// 난수의 범위: [0, 2^31) (Range of the random numbers: [0, 2^31)).
    pub const RANDOM_RANGE: u64 = 1 << 31;

    /// 난수 무한 스트림 (Infinite stream of random numbers).
    pub fn random_numbers(seed: u64) -> Stream<u64> {
        random_numbers_from(StdRng::seed_from_u64(seed))
    }

    fn random_numbers_from(mut rng: StdRng) -> Stream<u64> {
        let value = rng.random_range(0..RANDOM_RANGE);
        Stream::new(value, move || random_numbers_from(rng))
    }

    /// 실험 결과 스트림 (성공/실패): 연속한 두 난수가 서로소인가
    /// (Stream of experiment results (pass/fail): are two successive random numbers coprime).
    pub fn cesaro_stream(seed: u64) -> Stream<bool> {
        random_numbers(seed).map_successive_pairs(|a, b| a.gcd(b) == 1)
    }

    /// 지금까지의 성공 비율 스트림 (Stream of the running pass ratio).
    pub fn monte_carlo(experiments: &Stream<bool>, passed: u64, failed: u64) -> Stream<f64> {
        let Ok(&outcome) = experiments.head() else {
            return Stream::empty();
        };
        let (passed, failed) = if outcome {
            (passed + 1, failed)
        } else {
            (passed, failed + 1)
        };
        let experiments = experiments.clone();
        Stream::new(passed as f64 / (passed + failed) as f64, move || {
            monte_carlo(&experiments.drop(1), passed, failed)
        })
    }

    /// 파이 추정치 스트림: P(서로소) = 6/π² 이므로 π ≈ √(6/p)
    /// (Stream of pi estimates: P(coprime) = 6/π², so π ≈ √(6/p)).
    pub fn monte_carlo_pi(seed: u64) -> Stream<f64> {
        monte_carlo(&cesaro_stream(seed), 0, 0).map(|&p| (6.0 / p).sqrt())
    }
}

// =============================================================================
// 테스트 (Tests)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const EPSILON: f64 = 1e-12;

    fn big(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPSILON, "예상 {e}, 실제 {a} (Expected {e}, got {a})");
        }
    }

    #[test]
    fn test_lazy_interval_stops_early() {
        assert_eq!(delayed_lists::second_prime(10_000, 1_000_000), Ok(10_009));
        assert!(delayed_lists::second_prime(24, 28).is_err());
    }

    #[test]
    fn test_enumerate_interval() {
        let interval = delayed_lists::enumerate_interval(3, 6);
        assert_eq!(interval.to_vec(), vec![3, 4, 5, 6]);
        assert_eq!(delayed_lists::enumerate_interval(5, 5).to_vec(), vec![5]);
        assert!(delayed_lists::enumerate_interval(6, 5).is_empty());
    }

    #[test]
    fn test_sum_of_squares_odd() {
        // 처음 5개 홀수의 제곱 합: 1² + 3² + 5² + 7² + 9² = 165
        // (Sum of squares of first 5 odd numbers: 1² + 3² + 5² + 7² + 9² = 165)
        assert_eq!(delayed_lists::sum_of_squares_of_odd_numbers(5), 165);
    }

    #[test]
    fn test_integers_from() {
        let integers = integers_starting_from(1).take(10).to_vec();
        assert_eq!(integers, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_no_sevens() {
        assert_eq!(no_sevens().take(10).to_vec(), vec![1, 2, 3, 4, 5, 6, 8, 9, 10, 11]);
        assert_eq!(no_sevens().at(100), Ok(&117));
    }

    #[test]
    fn test_fibonacci() {
        let expected = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34];
        assert_eq!(fibgen(0u64, 1).take(10).to_vec(), expected);
        assert_eq!(fibs().take(10).to_vec(), big(&expected));
    }

    #[test]
    fn test_implicit_fibs_matches_generator() {
        let implicit = fibs();
        let generated = fibgen(BigUint::from(0u32), BigUint::from(1u32));
        assert_eq!(implicit.take(300), generated.take(300));
    }

    #[test]
    fn test_fibs_past_machine_words() {
        // u64는 94번째 항에서 넘친다 (u64 overflows at index 94)
        let fib_100: BigUint = "354224848179261915075".parse().unwrap();
        assert_eq!(fibs().at(100), Ok(&fib_100));
        assert_eq!(fibs().take(100).to_vec().len(), 100);
    }

    #[test]
    fn test_primes_sieve() {
        let primes = prime_sieve().take(10).to_vec();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_primes_trial_division() {
        let primes = primes();
        assert_eq!(
            primes.take(10).to_vec(),
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]
        );

        // 50번째 소수 (SICP는 0부터 센다) (50th prime (SICP counts from 0))
        assert_eq!(primes.at(49), Ok(&229));
        assert_eq!(prime_sieve().at(49), Ok(&229));
    }

    #[test]
    fn test_is_prime() {
        let found: Vec<u64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(found, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
    }

    #[test]
    fn test_prime_enumerate_interval() {
        assert_eq!(
            prime_enumerate_interval(10, 30).to_vec(),
            vec![11, 13, 17, 19, 23, 29]
        );
        assert_eq!(delayed_lists::sum_primes(1, 20), 77);
    }

    #[test]
    fn test_ones_stream() {
        assert_eq!(ones().take(5).to_vec(), vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_implicit_integers() {
        let integers = integers();
        assert_eq!(integers.take(10).reduce(0, |acc, x| acc + x), 55);
        assert_eq!(
            Stream::add([integers.take(10), integers.take(10)]).to_vec(),
            vec![2, 4, 6, 8, 10, 12, 14, 16, 18, 20]
        );
    }

    #[test]
    fn test_doubling_stream() {
        let powers_of_2 = doubles().take(8).to_vec();
        assert_eq!(powers_of_2, big(&[1, 2, 4, 8, 16, 32, 64, 128]));
        assert_eq!(doubles().at(100), Ok(&BigUint::from(2u32).pow(100)));
    }

    #[test]
    fn test_factorials() {
        assert_eq!(factorials().take(6).to_vec(), big(&[1, 2, 6, 24, 120, 720]));

        // 26! (u64는 21!에서 넘친다) (26!; u64 overflows at 21!)
        let factorial_26: BigUint = "403291461126605635584000000".parse().unwrap();
        assert_eq!(factorials().at(25), Ok(&factorial_26));
    }

    #[test]
    fn test_sqrt_stream() {
        let guesses = sqrt_stream(2.0).take(5).to_vec();
        assert_close(
            &guesses,
            &[1.0, 1.5, 1.4166666666666665, 1.4142156862745097, 1.4142135623746899],
        );
    }

    #[test]
    fn test_sqrt_stream_is_computed_once_per_guess() {
        let x = 9.0;
        let improvements = Rc::new(Cell::new(0));
        let counter = Rc::clone(&improvements);
        let guesses = Stream::cyclic(1.0, move |guesses: Stream<f64>| {
            guesses.map(move |&g| {
                counter.set(counter.get() + 1);
                sqrt_improve(g, x)
            })
        });

        guesses.at(10).unwrap();
        guesses.at(10).unwrap();
        assert_eq!(improvements.get(), 10);
    }

    #[test]
    fn test_pi_stream() {
        assert_close(
            &pi_stream().take(8).to_vec(),
            &[
                4.0,
                2.666666666666667,
                3.466666666666667,
                2.8952380952380956,
                3.3396825396825403,
                2.9760461760461765,
                3.2837384837384844,
                3.017071817071818,
            ],
        );
    }

    #[test]
    fn test_euler_transform() {
        assert_close(
            &euler_transform(&pi_stream()).take(8).to_vec(),
            &[
                3.166666666666667,
                3.1333333333333337,
                3.1452380952380956,
                3.13968253968254,
                3.1427128427128435,
                3.1408813408813416,
                3.142071817071818,
                3.1412548236077655,
            ],
        );
    }

    #[test]
    fn test_euler_transform_zero_denominator() {
        // 등차수열은 분모가 0이다 (An arithmetic sequence has a zero denominator)
        let s = Stream::from(vec![1.0, 2.0, 3.0, 4.0]);
        let transformed = euler_transform(&s).to_vec();
        assert_eq!(transformed.len(), 2);
        assert!(transformed.iter().all(|x| !x.is_finite()));
    }

    #[test]
    fn test_accelerated_sequence() {
        let accelerated = accelerated_sequence(pi_stream(), euler_transform).take(8).to_vec();
        assert_close(
            &accelerated,
            &[
                4.0,
                3.166666666666667,
                3.142105263157895,
                3.141599357319005,
                3.1415927140337785,
                3.1415926539752927,
                3.1415926535911765,
                3.141592653589778,
            ],
        );

        let errors: Vec<f64> = accelerated
            .iter()
            .take(5)
            .map(|x| (x - std::f64::consts::PI).abs())
            .collect();
        assert!(errors.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_accelerated_sequence_of_finite_stream_ends() {
        let s = Stream::from(vec![1.0, 0.5, 0.75, 0.625, 0.6875]);
        assert_eq!(accelerated_sequence(s, euler_transform).to_vec().len(), 3);
    }

    #[test]
    fn test_stream_limit() {
        let result = sqrt(2.0, 0.0001);
        assert!(result.is_some());
        let value = result.unwrap();
        assert!((value - 2.0_f64.sqrt()).abs() < 0.001);

        assert_eq!(stream_limit(&Stream::from(vec![1.0, 2.0]), 0.5), None);
    }

    #[test]
    fn test_pairs() {
        let pairs = pairs(&integers(), &integers());
        assert_eq!(
            pairs.take(5).to_vec(),
            vec![(1, 1), (1, 2), (2, 2), (1, 3), (2, 3)]
        );

        for (i, j) in pairs.take(200).iter() {
            assert!(
                i <= j,
                "쌍 ({i}, {j})이 i <= j를 위반 (Pair ({i}, {j}) violates i <= j)"
            );
        }
    }

    #[test]
    fn test_prime_sum_pairs() {
        let prime_sum_pairs = pairs(&integers(), &integers()).select(|(i, j)| is_prime(i + j));
        assert_eq!(
            prime_sum_pairs.take(5).to_vec(),
            vec![(1, 1), (1, 2), (2, 3), (1, 4), (1, 6)]
        );
    }

    #[test]
    fn test_integrator() {
        // 상수 스트림 적분 (선형 증가여야 함)
        // (Integrate constant stream (should give linear growth))
        let constant = Stream::cyclic(1.0, |ones| ones);
        let integral = integral(Delayed::ready(constant), 0.0, 0.1).take(11).to_vec();

        // 기대값: 0.0, 0.1, 0.2, 0.3, ..., 1.0
        // (Should be: 0.0, 0.1, 0.2, 0.3, ..., 1.0)
        for (i, &value) in integral.iter().enumerate() {
            let expected = i as f64 * 0.1;
            assert!(
                (value - expected).abs() < 0.0001,
                "예상 {expected}, 실제 {value} (Expected {expected}, got {value})"
            );
        }
    }

    #[test]
    fn test_solve_differential_equation() -> Result<()> {
        // dy/dt = y, y(0) = 1을 풀이 (Solve dy/dt = y with y(0) = 1)
        // 해석해: y = e^t (Analytical solution: y = e^t)
        let solution = solve(|y| y, 1.0, 0.001)?;
        let y_at_1 = *solution.at(1000)?;
        assert!((y_at_1 - 2.716923932235896).abs() < 1e-9);
        assert!((y_at_1 - std::f64::consts::E).abs() < 0.01);
        Ok(())
    }

    #[test]
    fn test_solve_2nd() -> Result<()> {
        // y'' = y, y(0) = y'(0) = 1 이면 y = e^t (then y = e^t)
        let solution = solve_2nd(0.0, 1.0, 0.001, 1.0, 1.0)?;
        assert!((solution.at(1000)? - 2.716923932235896).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_random_numbers_are_reproducible() {
        let a = monte_carlo::random_numbers(7);
        let b = monte_carlo::random_numbers(7);
        assert_eq!(a.take(20), b.take(20));
        assert!(a.take(20).iter().all(|&x| x < monte_carlo::RANDOM_RANGE));
        // 같은 스트림은 다시 읽어도 같다 (Re-reading a stream gives the same values)
        assert_eq!(a.at(5), a.at(5));
    }

    #[test]
    fn test_monte_carlo_ratio() {
        let experiments = Stream::from(vec![true, false, true, true]);
        assert_eq!(
            monte_carlo::monte_carlo(&experiments, 0, 0).to_vec(),
            vec![1.0, 0.5, 2.0 / 3.0, 0.75]
        );
    }

    #[test]
    fn test_monte_carlo_pi() {
        let estimate = *monte_carlo::monte_carlo_pi(42).at(1000).unwrap();

        // 파이에 가까워야 함 (Should be close to pi)
        assert!(
            (estimate - std::f64::consts::PI).abs() < 0.3,
            "파이 추정치 {estimate}가 실제 파이에서 너무 멀다 (Pi estimate {estimate} too far from actual pi)"
        );
    }

    #[test]
    fn test_scale_stream() {
        let scaled = integers_starting_from(1).scale(10).take(5).to_vec();
        assert_eq!(scaled, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_infinite_stream_interleaving() {
        // 두 무한 스트림을 교차 (Interleave two infinite streams)
        let interleaved = Stream::interleave(&integers_starting_from(1), &fibgen(0, 1))
            .take(10)
            .to_vec();

        // 기대값: 1, 0, 2, 1, 3, 1, 4, 2, 5, 3
        // (Should be: 1, 0, 2, 1, 3, 1, 4, 2, 5, 3)
        assert_eq!(interleaved, vec![1, 0, 2, 1, 3, 1, 4, 2, 5, 3]);
    }
}
