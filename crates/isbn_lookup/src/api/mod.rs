use serde::de::DeserializeOwned;

use crate::{Error, ErrorKind};

/// A minimal HTTP client able to fetch and deserialize a JSON document.
///
/// The lookup functions are generic over this trait so that tests can swap the network for a
/// canned response.
pub trait Client
where
    Self: Default,
{
    /// Sends a `GET` request to `url` and deserializes the JSON body.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error when the request cannot be completed, an
    /// [`ErrorKind::Status`] error when the status code is not a success and an
    /// [`ErrorKind::Deserialize`] error when the body is not the expected JSON.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::status(status.as_u16()));
        }

        resp.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, NotFoundStatusProducer,
    Producer, URL_SINK,
};

#[cfg(test)]
mod test {

    use super::*;

    thread_local! {
        pub(crate) static URL_SINK: std::cell::RefCell<Option<String>> = std::cell::RefCell::new(None);
    }

    /// Asserts that the expected URL is the same as the one provided to the [`MockClient`].
    ///
    /// The [`MockClient`] will update the static thread local `URL_SINK` with the URL string that
    /// was passed to it, this allows for asserting that the lookup is requesting the correct URL.
    macro_rules! assert_url {
        ($expected: expr) => {
            assert_url!($expected, "");
        };
        ($expected: expr, $($arg: tt)+) => {
            let url = crate::api::URL_SINK.with(|url| url.borrow().clone().unwrap_or_default());
            assert_eq!($expected, url, $($arg)+);
        };
    }

    pub(crate) trait Producer<T>
    where
        Self: Default,
    {
        fn produce() -> Result<T, Error>;
    }

    #[derive(Default)]
    pub(crate) struct MockClient<P: Producer<String> = EmptyTextProducer> {
        _producer: std::marker::PhantomData<P>,
    }

    impl<P: Producer<String>> Client for MockClient<P> {
        fn get_json<T>(&self, url: &str) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            URL_SINK.with(|sink| *sink.borrow_mut() = Some(url.to_owned()));
            P::produce().and_then(|json| {
                serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
            })
        }
    }

    macro_rules! impl_text_producer {
        ($($producer:ident => $exp:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::Producer<String> for $producer {
                    fn produce() -> Result<String, crate::Error> {
                        $exp
                    }
                }
            )*
        };
    }
    impl_text_producer! {
        EmptyTextProducer => Ok("".to_owned()),
        NetworkErrorProducer => Err(Error::new(ErrorKind::IO, "connection refused")),
        NotFoundStatusProducer => Err(Error::status(404)),
    }

    pub(crate) use assert_url;
    pub(crate) use impl_text_producer;
}
